//! Plume Desktop Application
//!
//! A desktop client for cloud-backed personal notes.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod services;
mod state;
mod theme;
mod views;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plume=debug".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Plume...");

    dioxus::launch(app::App);
}
