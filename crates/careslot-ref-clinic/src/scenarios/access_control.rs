//! Scenario 2: Role-based route access
//!
//! Every directory user logs in and visits the same set of pages. Shows the
//! landing route per role, the patient's redirect to their own dashboard,
//! the admin refused on patient-only pages, the `/patients` alias, and an
//! unknown path. Each refusal is recorded in the activity trail.

use chrono::Utc;

use careslot_contracts::{access::RouteDecision, error::CareResult};
use careslot_core::visibility;

use crate::{clinic::ReferenceClinic, config::ClinicConfig, mock_data};

use super::print_trail_summary;

const PAGES: [&str; 6] = [
    "/dashboard",
    "/appointments",
    "/patient-dashboard",
    "/admin/patients",
    "/patients",
    "/reports",
];

fn describe(decision: &RouteDecision) -> String {
    match decision {
        RouteDecision::Allow => "allow".to_string(),
        RouteDecision::Login { to, from } => format!("login at {} (return to {})", to, from),
        RouteDecision::Redirect { to } => format!("alias of {}", to),
        RouteDecision::Denied { to, .. } => format!("DENIED, sent to {}", to),
        RouteDecision::NotFound { .. } => "not found".to_string(),
    }
}

pub fn run_scenario(config: &ClinicConfig) -> CareResult<()> {
    println!("=== Scenario 2: Role-based Access ===");
    println!();

    let mut clinic = ReferenceClinic::in_memory(config.clone())?;

    println!("  Anonymous visitor:");
    let decision = clinic.navigate("/appointments")?;
    println!("    {:<22}{}", "/appointments", describe(&decision));
    println!();

    for user in mock_data::users() {
        let landing = clinic.sessions.login(&user.email, "demo", Utc::now())?;
        let tabs: Vec<&str> = visibility::available_tabs(user.role)
            .into_iter()
            .map(|t| t.label())
            .collect();
        println!("  {} ({}):", user.name, user.role.label());
        println!("    landing               {}", landing);
        println!("    tabs                  {}", tabs.join(", "));
        for page in PAGES {
            let decision = clinic.navigate(page)?;
            println!("    {:<22}{}", page, describe(&decision));
        }
        clinic.sessions.logout()?;
        println!();
    }

    let denials = clinic
        .trail()
        .count(careslot_contracts::activity::ActionKind::AccessDenied)?;
    println!("  Access denials recorded: {}", denials);
    print_trail_summary(&clinic)?;
    println!();
    println!("  Scenario 2 complete.");
    println!();
    Ok(())
}
