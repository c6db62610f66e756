use chrono::{DateTime, Local, Utc};

use crate::core::power_monitor::ReadingExtras;

/// Format timestamp in human-readable local time (HH:MM:SS)
pub fn format_time(time: DateTime<Utc>) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%H:%M:%S").to_string()
}

/// Format the age of a reading ("now", "12s ago", "3m ago", "2h ago")
pub fn format_age(since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(since) = since else {
        return "never".to_string();
    };

    let secs = (now - since).num_seconds().max(0);
    if secs < 1 {
        "now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

/// One-line summary of the optional quantities, empty when none were sent
pub fn format_extras(extras: &ReadingExtras) -> String {
    let mut parts = Vec::new();

    if let Some(var) = extras.reactive_power {
        parts.push(format!("Q {:.0} var", var));
    }
    if let Some(pf) = extras.power_factor {
        parts.push(format!("PF {:.2}", pf));
    }
    if let Some(i_pp) = extras.current_pp {
        parts.push(format!("Ipp {:.2} A", i_pp));
    }
    if let Some(v_pp) = extras.voltage_pp {
        parts.push(format!("Vpp {:.1} V", v_pp));
    }

    parts.join(" │ ")
}
