use chrono::Utc;
use nexus_core::{UserRole, View};
use serde::Serialize;

use super::open_app;

#[derive(Serialize)]
struct MenuEntry {
    view: View,
    title: &'static str,
}

#[derive(Serialize)]
struct SessionInfo {
    role: UserRole,
    greeting: String,
    views: Vec<MenuEntry>,
}

pub fn run(role: Option<UserRole>) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(role)?;
    let summary = app.dashboard(Utc::now())?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub fn session(role: Option<UserRole>) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(role)?;
    let session = app.session();
    let role = session.current_role()?;
    let info = SessionInfo {
        role,
        greeting: session.greeting()?,
        views: View::menu_for(role)
            .into_iter()
            .map(|view| MenuEntry {
                view,
                title: view.title(),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
