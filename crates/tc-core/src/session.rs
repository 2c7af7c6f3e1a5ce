//! GM session: the overland and site engines plus the calendar, driven by
//! text commands.

use std::sync::Arc;

use rand::rngs::StdRng;

use crate::calendar::{Calendar, DateChange};
use crate::config::SessionConfig;
use crate::data::GameData;
use crate::encounter::Encounter;
use crate::error::{TcError, TcResult};
use crate::overland::OverlandEngine;
use crate::random::seeded;
use crate::site::SiteEngine;
use crate::time::{Slot, Watch};

/// An interactive GM session.
pub struct GmSession {
    config: SessionConfig,
    overland: OverlandEngine<StdRng>,
    site: SiteEngine<StdRng>,
    calendar: Option<Calendar>,
}

impl GmSession {
    /// Create a session over loaded data and an optional calendar.
    ///
    /// When the calendar has a current date its season becomes the
    /// overland season.
    pub fn new(data: GameData, calendar: Option<Calendar>, config: SessionConfig) -> Self {
        let data = Arc::new(data);
        let overland = OverlandEngine::new(Arc::clone(&data), seeded(config.seed));
        let site = SiteEngine::new(data, seeded(config.seed.wrapping_add(1)));
        let mut session = Self {
            config,
            overland,
            site,
            calendar,
        };
        session.sync_season();
        session
    }

    /// Get the overland engine.
    pub fn overland(&self) -> &OverlandEngine<StdRng> {
        &self.overland
    }

    /// Get the overland engine mutably.
    pub fn overland_mut(&mut self) -> &mut OverlandEngine<StdRng> {
        &mut self.overland
    }

    /// Get the site engine.
    pub fn site(&self) -> &SiteEngine<StdRng> {
        &self.site
    }

    /// Get the site engine mutably.
    pub fn site_mut(&mut self) -> &mut SiteEngine<StdRng> {
        &mut self.site
    }

    /// Get the calendar, if one was loaded.
    pub fn calendar(&self) -> Option<&Calendar> {
        self.calendar.as_ref()
    }

    /// Get the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> TcResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "zone" => self.do_zone(rest),
            "overlay" => self.do_overlay(rest),
            "season" => self.do_season(rest),
            "site-zone" => self.do_site_zone(rest),
            "day" => self.do_new_day(),
            "regen" => self.do_regen(rest),
            "reset" => self.do_reset(rest),
            "overland" => Ok(self.render_overland()),
            "turn" => self.do_turn(),
            "regen-site" => self.do_regen_site(),
            "regen-slot" => self.do_regen_slot(rest),
            "site" => Ok(self.render_site()),
            "timer" => self.do_timer(rest),
            "timers" => Ok(self.render_timers()),
            "expand" => self.do_expand(rest, true),
            "collapse" => self.do_expand(rest, false),
            "date" => self.do_date(rest),
            "holidays" => Ok(self.render_holidays()),
            "status" => Ok(self.do_status()),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(TcError::Validation(format!(
                "unknown command '{cmd}', type 'help' for a list"
            ))),
        }
    }

    fn sync_season(&mut self) {
        let Some(season) = self.calendar.as_ref().and_then(Calendar::current_season) else {
            return;
        };
        if let Err(e) = self.overland.set_season(season) {
            log::warn!("calendar season not usable overland: {e}");
        }
    }

    fn do_zone(&mut self, rest: &str) -> TcResult<String> {
        if rest.is_empty() {
            return Err(usage("zone <name>"));
        }
        let zone = self.overland.set_zone(rest)?;
        Ok(format!("Overland zone: {zone}"))
    }

    fn do_overlay(&mut self, rest: &str) -> TcResult<String> {
        match rest.to_lowercase().as_str() {
            "" | "none" | "off" => {
                self.overland.set_overlay(None)?;
                Ok("Overlay cleared.".to_string())
            }
            _ => {
                self.overland.set_overlay(Some(rest))?;
                let name = self.overland.selection().overlay.as_deref().unwrap_or(rest);
                Ok(format!("Overlay: {name}"))
            }
        }
    }

    fn do_season(&mut self, rest: &str) -> TcResult<String> {
        if rest.is_empty() {
            return Err(usage("season <name>"));
        }
        let season = self.overland.set_season(rest)?;
        Ok(format!("Season: {season}"))
    }

    fn do_site_zone(&mut self, rest: &str) -> TcResult<String> {
        if rest.is_empty() {
            return Err(usage("site-zone <name>"));
        }
        let zone = self.site.set_zone(rest)?.to_string();
        self.site.generate()?;
        Ok(format!("Site zone: {zone}\n{}", self.render_site()))
    }

    fn do_new_day(&mut self) -> TcResult<String> {
        let change = self.overland.new_day(self.calendar.as_mut())?;
        let mut out = String::new();
        if let Some(change) = change {
            out.push_str(&self.describe_date_change(change));
            out.push('\n');
        }
        out.push_str(&self.render_overland());
        Ok(out)
    }

    fn do_regen(&mut self, rest: &str) -> TcResult<String> {
        match rest.to_lowercase().as_str() {
            "" | "day" => {
                self.overland.regenerate_day()?;
                Ok(self.render_overland())
            }
            "weather" => {
                let weather = self.overland.regenerate_weather()?;
                Ok(format!("Weather: {weather}"))
            }
            other => {
                let watch = Watch::parse(other)
                    .ok_or_else(|| usage("regen [day|weather|<watch>]"))?;
                self.overland.regenerate_one(watch)?;
                let mut out = String::new();
                let state = self.overland.state();
                render_encounter(
                    &mut out,
                    watch.label(),
                    state.encounter(watch),
                    state.expanded.watch(watch),
                );
                Ok(out.trim_end().to_string())
            }
        }
    }

    fn do_reset(&mut self, rest: &str) -> TcResult<String> {
        match rest.to_lowercase().as_str() {
            "overland" => {
                self.overland.reset();
                Ok("Overland reset to day 0.".to_string())
            }
            "site" => {
                self.site.reset();
                Ok("Site reset.".to_string())
            }
            "" | "all" => {
                self.overland.reset();
                self.site.reset();
                Ok("Overland and site reset.".to_string())
            }
            _ => Err(usage("reset [overland|site|all]")),
        }
    }

    fn do_turn(&mut self) -> TcResult<String> {
        self.site.advance_turn()?;
        Ok(self.render_site())
    }

    fn do_regen_site(&mut self) -> TcResult<String> {
        self.site.regenerate_turn()?;
        Ok(self.render_site())
    }

    fn do_regen_slot(&mut self, rest: &str) -> TcResult<String> {
        let slot = Slot::parse(rest).ok_or_else(|| usage("regen-slot <current|10|20|30|40|50>"))?;
        self.site.regenerate_one(slot)?;
        let mut out = String::new();
        let state = self.site.state();
        render_encounter(
            &mut out,
            slot.label(),
            state.encounter(slot),
            state.expanded.slot(slot),
        );
        Ok(out.trim_end().to_string())
    }

    fn do_timer(&mut self, rest: &str) -> TcResult<String> {
        let parts: Vec<&str> = rest.splitn(2, ' ').collect();
        let sub = parts[0].to_lowercase();
        let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match sub.as_str() {
            "add" if !arg.is_empty() => {
                let (minutes, name) = parse_timer_args(arg, self.config.default_timer_minutes);
                if name.is_empty() {
                    return Err(usage("timer add [minutes] <name>"));
                }
                let timer = self.site.add_timer(name, minutes);
                Ok(format!("Timer added: {timer}"))
            }
            "remove" | "rm" => {
                let n: usize = arg
                    .parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| usage("timer remove <number>"))?;
                let timer = self.site.remove_timer_at(n - 1)?;
                Ok(format!("Timer removed: {}", timer.name))
            }
            _ => Err(usage("timer add [minutes] <name> | timer remove <number>")),
        }
    }

    fn do_expand(&mut self, rest: &str, open: bool) -> TcResult<String> {
        if let Some(slot) = Slot::parse(rest) {
            self.site.set_expanded(slot, open);
            return Ok(self.render_site());
        }
        if let Some(watch) = Watch::parse(rest) {
            self.overland.set_expanded(watch, open);
            return Ok(self.render_overland());
        }
        Err(usage("expand|collapse <watch or slot>"))
    }

    fn do_date(&mut self, rest: &str) -> TcResult<String> {
        let Some(calendar) = self.calendar.as_mut() else {
            return Ok("No calendar loaded.".to_string());
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        let change = match parts.as_slice() {
            [] => {
                let mut out = format!("Date: {}", calendar.current_label());
                if let Some(holiday) = calendar.current_holiday() {
                    out.push_str(&format!("\nHoliday: {}", holiday.name));
                    if !holiday.description.is_empty() {
                        out.push_str(&format!(" - {}", holiday.description));
                    }
                }
                return Ok(out);
            }
            [sub, month, day] if sub.eq_ignore_ascii_case("set") => {
                let (month, day) = match (month.parse::<u32>(), day.parse::<u32>()) {
                    (Ok(m), Ok(d)) => (m, d),
                    _ => return Err(usage("date set <month> <day>")),
                };
                calendar.set_date(month, day)?
            }
            [sub, days] if sub.eq_ignore_ascii_case("advance") => {
                let days = days.parse::<u32>().map_err(|_| usage("date advance <days>"))?;
                calendar.advance(days)?
            }
            _ => return Err(usage("date [set <month> <day> | advance <days>]")),
        };
        Ok(self.describe_date_change(change))
    }

    fn describe_date_change(&mut self, change: DateChange) -> String {
        self.sync_season();
        let mut out = match &self.calendar {
            Some(cal) => format!("Date: {}", cal.label(change.date)),
            None => format!("Date: {}", change.date),
        };
        if let Some(holiday) = self.calendar.as_ref().and_then(|c| c.holiday_at(change.date)) {
            out.push_str(&format!("\nHoliday: {}", holiday.name));
        }
        if let Some(warning) = change.warning {
            out.push_str(&format!("\nwarning: date not saved: {warning}"));
        }
        out
    }

    fn do_status(&self) -> String {
        let sel = self.overland.selection();
        let mut out = format!(
            "Overland: zone {}, overlay {}, season {}, day {}\n",
            sel.zone.as_deref().unwrap_or("-"),
            sel.overlay.as_deref().unwrap_or("-"),
            sel.season.as_deref().unwrap_or("-"),
            self.overland.state().day_count
        );
        out.push_str(&format!(
            "Site: zone {}, {}, {} timers\n",
            self.site.zone().unwrap_or("-"),
            self.site.state().elapsed_label(),
            self.site.state().timers.len()
        ));
        match &self.calendar {
            Some(cal) => out.push_str(&format!("Date: {}", cal.current_label())),
            None => out.push_str("No calendar."),
        }
        out
    }

    fn render_overland(&self) -> String {
        let state = self.overland.state();
        if !state.is_generated() {
            return "No day generated yet. Type 'day' to start.".to_string();
        }
        let sel = self.overland.selection();
        let mut out = format!(
            "Day {} | {}{} | {}\n",
            state.day_count,
            sel.zone.as_deref().unwrap_or("-"),
            sel.overlay
                .as_deref()
                .map(|o| format!(" + {o}"))
                .unwrap_or_default(),
            sel.season.as_deref().unwrap_or("-"),
        );
        if let Some(weather) = &state.weather {
            out.push_str(&format!("Weather: {weather}\n"));
        }
        for watch in Watch::ALL {
            render_encounter(
                &mut out,
                watch.label(),
                state.encounter(watch),
                state.expanded.watch(watch),
            );
        }
        if let Some(rest) = &state.rest_info {
            if !rest.rest_dcs.is_empty() {
                let dcs: Vec<String> = rest
                    .rest_dcs
                    .iter()
                    .map(|d| format!("{} {}", d.camp, d.dc))
                    .collect();
                out.push_str(&format!("Rest DCs: {}\n", dcs.join(", ")));
            }
            for m in &rest.weather_modifiers {
                out.push_str(&format!("  {} {:+} ({})\n", m.effect, m.modifier, m.description));
            }
            for m in &rest.situational_modifiers {
                out.push_str(&format!("  {} {:+}\n", m.situation, m.modifier));
            }
        }
        out.trim_end().to_string()
    }

    fn render_site(&self) -> String {
        let state = self.site.state();
        let mut out = format!(
            "Site: {} | {}\n",
            self.site.zone().unwrap_or("-"),
            state.elapsed_label()
        );
        for slot in Slot::ALL {
            render_encounter(
                &mut out,
                slot.label(),
                state.encounter(slot),
                state.expanded.slot(slot),
            );
        }
        if !state.timers.is_empty() {
            out.push_str(&self.render_timers());
        }
        out.trim_end().to_string()
    }

    fn render_timers(&self) -> String {
        let timers = self.site.state().timers.all();
        if timers.is_empty() {
            return "No timers.".to_string();
        }
        let mut out = format!("Timers ({}):\n", timers.len());
        for (i, t) in timers.iter().enumerate() {
            out.push_str(&format!("  {}. {t}\n", i + 1));
        }
        out.trim_end().to_string()
    }

    fn render_holidays(&self) -> String {
        let Some(cal) = &self.calendar else {
            return "No calendar loaded.".to_string();
        };
        if cal.holidays().is_empty() {
            return "No holidays.".to_string();
        }
        let mut out = String::from("Holidays:\n");
        for h in cal.holidays() {
            out.push_str(&format!("  {} {}: {}", h.month, h.day, h.name));
            if !h.description.is_empty() {
                out.push_str(&format!(" - {}", h.description));
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }
}

fn usage(text: &str) -> TcError {
    TcError::Validation(format!("usage: {text}"))
}

/// `[minutes] name`: a leading integer is the duration.
fn parse_timer_args(arg: &str, default_minutes: i32) -> (i32, &str) {
    let mut parts = arg.splitn(2, ' ');
    let first = parts.next().unwrap_or("");
    match first.parse::<i32>() {
        Ok(minutes) => (minutes, parts.next().map(str::trim).unwrap_or("")),
        Err(_) => (default_minutes, arg),
    }
}

fn render_encounter(out: &mut String, label: &str, encounter: Option<&Encounter>, expanded: bool) {
    let Some(enc) = encounter else {
        out.push_str(&format!("  {label:<12} -\n"));
        return;
    };
    match &enc.name {
        Some(name) if enc.sparks.is_empty() => out.push_str(&format!("  {label:<12} {name}\n")),
        Some(name) => out.push_str(&format!(
            "  {label:<12} {name} ({})\n",
            enc.sparks.join("; ")
        )),
        None => out.push_str(&format!("  {label:<12} No Encounter\n")),
    }
    if expanded && enc.is_encounter() {
        if let Some(desc) = &enc.description {
            out.push_str(&format!("               {desc}\n"));
        }
        if let Some(habitat) = &enc.habitat {
            out.push_str(&format!("               Habitat: {habitat}\n"));
        }
    }
}

const HELP: &str = "\
GM Commands:
  zone <name>                   Select the overland zone
  overlay <name|none>           Select or clear the overlay zone
  season <name>                 Select the season
  day                           Advance to a new day
  regen [day|weather|<watch>]   Regenerate the day, weather or one watch
  overland                      Show the current day
  site-zone <name>              Enter a site
  turn                          Let ten minutes pass in the site
  regen-site                    Regenerate all six site slots
  regen-slot <slot>             Regenerate one slot (current, 10 ... 50)
  site                          Show the site
  timer add [minutes] <name>    Start a timer (default 60 minutes)
  timer remove <number>         Stop a timer
  timers                        List timers
  expand|collapse <watch|slot>  Show or hide encounter details
  date                          Show the date and holiday
  date set <month> <day>        Set the date
  date advance <days>           Move the date forward
  holidays                      List holidays
  reset [overland|site|all]     Clear generated content
  status                        Show session status
  help                          Show this help
  quit                          Exit";
