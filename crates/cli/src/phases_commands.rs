//! CLI command listing the lifecycle phase table.

use dsba_common::hooks::{LifecyclePhase, PhaseBehavior};

pub fn handle_phases(json: bool) -> anyhow::Result<()> {
    if json {
        let entries: Vec<serde_json::Value> = LifecyclePhase::ALL
            .iter()
            .map(|phase| {
                serde_json::json!({
                    "phase": phase,
                    "entry_point": phase.entry_point(),
                    "behavior": phase.behavior(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for phase in LifecyclePhase::ALL {
        let (mark, what) = match phase.behavior() {
            PhaseBehavior::Handle => ("✓", "publishes DBUS_SESSION_BUS_ADDRESS"),
            PhaseBehavior::Ignore => ("·", "ignored"),
            PhaseBehavior::Unsupported => ("✗", "not provided (service error)"),
        };
        println!("  {mark} {:<22} {what}", phase.entry_point());
    }
    Ok(())
}
