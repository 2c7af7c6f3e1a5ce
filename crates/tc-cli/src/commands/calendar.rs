use std::path::Path;

use colored::Colorize;

use tc_core::DateChange;

pub fn run(dir: &Path, set: Option<(u32, u32)>, advance: Option<u32>) -> Result<(), String> {
    let loaded = super::load(dir)?;
    let mut calendar = loaded
        .open_calendar()
        .ok_or_else(|| format!("no calendar configured in '{}'", dir.display()))?;

    let mut changes: Vec<DateChange> = Vec::new();
    if let Some((month, day)) = set {
        changes.push(calendar.set_date(month, day).map_err(|e| e.to_string())?);
    }
    if let Some(days) = advance {
        changes.push(calendar.advance(days).map_err(|e| e.to_string())?);
    }
    for change in &changes {
        if let Some(warning) = &change.warning {
            eprintln!("  {} date not saved: {warning}", "warning:".yellow());
        }
    }

    println!("  Date: {}", calendar.current_label().bold());
    if let Some(holiday) = calendar.current_holiday() {
        print!("  Holiday: {}", holiday.name.cyan());
        if !holiday.description.is_empty() {
            print!(" - {}", holiday.description);
        }
        println!();
    }
    if let Some(date) = calendar.current_date() {
        let weekday = (calendar
            .months()
            .iter()
            .take(date.month.saturating_sub(1) as usize)
            .map(|m| m.days)
            .sum::<u32>()
            + date.day
            - 1)
            % calendar.days_per_week().max(1)
            + 1;
        println!(
            "  Day {weekday} of a {}-day week",
            calendar.days_per_week()
        );
    }

    Ok(())
}
