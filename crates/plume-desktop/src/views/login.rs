//! Login and sign-up view

use dioxus::prelude::*;

use plume_core::auth::SignUpOutcome;

use crate::state::AppState;

/// Email/password form delegating to the auth gate. Success is observed via
/// the session subscription, so this component only renders errors.
#[component]
pub fn Login() -> Element {
    let state = use_context::<AppState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let colors = (state.theme)().palette();

    let busy = (state.auth_busy)();
    let error_message = (state.auth_error)();
    let notice = (state.auth_notice)();
    let gate_available = (state.auth)().is_some();

    let sign_in = move |_| {
        let Some(gate) = (state.auth)() else {
            return;
        };
        let email_value = email();
        let password_value = password();
        let mut auth_error = state.auth_error;
        let mut auth_notice = state.auth_notice;
        let mut auth_busy = state.auth_busy;

        spawn(async move {
            auth_busy.set(true);
            auth_error.set(None);
            auth_notice.set(None);
            if let Err(error) = gate.sign_in(&email_value, &password_value).await {
                tracing::warn!("Sign-in failed: {}", error);
                auth_error.set(Some(error.to_string()));
            }
            auth_busy.set(false);
        });
    };

    let sign_up = move |_| {
        let Some(gate) = (state.auth)() else {
            return;
        };
        let email_value = email();
        let password_value = password();
        let mut auth_error = state.auth_error;
        let mut auth_notice = state.auth_notice;
        let mut auth_busy = state.auth_busy;

        spawn(async move {
            auth_busy.set(true);
            auth_error.set(None);
            auth_notice.set(None);
            match gate.sign_up(&email_value, &password_value).await {
                Ok(SignUpOutcome::SignedIn) => {}
                Ok(SignUpOutcome::ConfirmationRequired) => {
                    auth_notice.set(Some(
                        "Check your inbox to confirm your account, then sign in.".to_string(),
                    ));
                }
                Err(error) => {
                    tracing::warn!("Sign-up failed: {}", error);
                    auth_error.set(Some(error.to_string()));
                }
            }
            auth_busy.set(false);
        });
    };

    rsx! {
        div {
            class: "login-container",
            style: "
                min-height: 100vh;
                display: flex;
                align-items: center;
                justify-content: center;
                background: {colors.bg_secondary};
            ",

            div {
                class: "login-card",
                style: "
                    width: 320px;
                    padding: 32px;
                    border: 1px solid {colors.border};
                    border-radius: 12px;
                    background: {colors.bg_primary};
                ",

                h1 {
                    style: "margin: 0 0 4px 0; font-size: 24px; color: {colors.text_primary};",
                    "Plume"
                }
                div {
                    style: "margin-bottom: 20px; font-size: 13px; color: {colors.text_muted};",
                    "Your notes, wherever you sign in."
                }

                if let Some(message) = error_message {
                    div {
                        class: "auth-error",
                        style: "margin-bottom: 12px; font-size: 13px; color: {colors.danger};",
                        "{message}"
                    }
                }

                if let Some(message) = notice {
                    div {
                        class: "auth-notice",
                        style: "margin-bottom: 12px; font-size: 13px; color: {colors.success};",
                        "{message}"
                    }
                }

                input {
                    class: "auth-input",
                    style: "
                        width: 100%;
                        box-sizing: border-box;
                        margin-bottom: 8px;
                        padding: 8px 10px;
                        border: 1px solid {colors.border};
                        border-radius: 6px;
                        background: {colors.bg_primary};
                        color: {colors.text_primary};
                    ",
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    disabled: busy || !gate_available,
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    class: "auth-input",
                    style: "
                        width: 100%;
                        box-sizing: border-box;
                        margin-bottom: 16px;
                        padding: 8px 10px;
                        border: 1px solid {colors.border};
                        border-radius: 6px;
                        background: {colors.bg_primary};
                        color: {colors.text_primary};
                    ",
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    disabled: busy || !gate_available,
                    oninput: move |evt| password.set(evt.value()),
                }

                div {
                    class: "auth-actions",
                    style: "display: flex; gap: 8px;",

                    button {
                        style: "
                            flex: 1;
                            padding: 8px 0;
                            border: none;
                            border-radius: 6px;
                            cursor: pointer;
                            background: {colors.accent};
                            color: {colors.accent_text};
                        ",
                        disabled: busy || !gate_available,
                        onclick: sign_in,
                        "Sign In"
                    }
                    button {
                        style: "
                            flex: 1;
                            padding: 8px 0;
                            border: 1px solid {colors.border};
                            border-radius: 6px;
                            cursor: pointer;
                            background: {colors.bg_primary};
                            color: {colors.text_primary};
                        ",
                        disabled: busy || !gate_available,
                        onclick: sign_up,
                        "Sign Up"
                    }
                }

                if busy {
                    div {
                        style: "margin-top: 12px; font-size: 12px; color: {colors.text_muted};",
                        "Working..."
                    }
                }
            }
        }
    }
}
