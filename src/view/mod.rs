//! Presentation: HTML fragments rendered from application state
//!
//! Every function here is pure. Clickable elements carry `data-*`
//! attributes that decode back into [`Intent`](crate::shell::Intent)s;
//! settings controls carry `data-setting` with the saved field name.

pub mod html;

use std::fmt::Write;

use html::{amount, bar_width, escape, rate};

use crate::notifications::NotificationFeed;
use crate::settings::{GameSettings, GraphicsQuality, Theme};
use crate::shell::{App, HELP_SECTIONS, HelpOverlay, Panel};
use crate::state::{GRID_COLUMNS, MapSector, Quest, Resources, SectorControl, Unit};

/// All regions of the page, keyed by the id of their container element
pub struct Frame {
    pub theme_class: &'static str,
    pub resource_bar: String,
    pub navigation: String,
    pub panel: String,
    pub notifications: String,
    pub help: String,
}

/// Render the whole page
pub fn frame(app: &App, now: f64) -> Frame {
    Frame {
        theme_class: app.settings().theme.css_class(),
        resource_bar: resource_bar(&app.snapshot().resources),
        navigation: navigation(app.panel()),
        panel: panel(app),
        notifications: notification_feed(app.notifications(), now),
        help: help_overlay(app.help()),
    }
}

pub fn resource_bar(resources: &Resources) -> String {
    let mut out = String::new();
    for (kind, res) in resources.iter() {
        let _ = write!(
            out,
            concat!(
                r#"<div class="resource" data-resource="{key}" title="{label}">"#,
                r#"<span class="amount">{amount}</span>"#,
                r#"<span class="capacity">/ {capacity}</span>"#,
                r#"<div class="bar"><div class="fill" style="{width}"></div></div>"#,
                r#"<div class="tooltip">+{increment}/s</div>"#,
                "</div>"
            ),
            key = kind.key(),
            label = kind.label(),
            amount = amount(res.amount),
            capacity = amount(res.capacity),
            width = bar_width(res.fill_ratio()),
            increment = rate(res.increment),
        );
    }
    out
}

pub fn navigation(active: Panel) -> String {
    let mut out = String::new();
    for panel in Panel::ALL {
        let class = if panel == active { "nav-item active" } else { "nav-item" };
        let _ = write!(
            out,
            r#"<button class="{}" data-panel="{}">{}</button>"#,
            class,
            panel.as_str(),
            panel.label()
        );
    }
    out
}

/// Main area for the active panel
pub fn panel(app: &App) -> String {
    let snapshot = app.snapshot();
    match app.panel() {
        Panel::Map => map_panel(&snapshot.map_sectors, app.selected_sector()),
        Panel::Units => units_panel(&snapshot.units),
        Panel::Quests => quests_panel(&snapshot.quests),
        Panel::Research => research_panel(),
        Panel::Settings => settings_panel(&snapshot.settings),
    }
}

fn sector_class(control: SectorControl) -> &'static str {
    match control {
        SectorControl::Enemy => "sector enemy",
        SectorControl::Friendly => "sector friendly",
        // Neutral and contested share the default styling
        SectorControl::Neutral | SectorControl::Contested => "sector neutral",
    }
}

pub fn map_panel(sectors: &[MapSector], selected: Option<&MapSector>) -> String {
    let mut out = format!(
        r#"<h3 class="panel-title map">Strategic Map</h3><div class="sector-grid" style="grid-template-columns: repeat({}, 3rem)">"#,
        GRID_COLUMNS
    );
    for sector in sectors {
        let _ = write!(
            out,
            r#"<div class="{}" data-sector="{}">{}</div>"#,
            sector_class(sector.control),
            sector.id,
            if sector.resources.is_some() {
                r#"<div class="deposit"></div>"#
            } else {
                ""
            }
        );
    }
    out.push_str("</div>");

    if let Some(sector) = selected {
        let _ = write!(
            out,
            concat!(
                r#"<div class="sector-details"><h4>Sector {id} Details</h4>"#,
                "<p>Type: {kind}</p><p>Threat Level: {threat}%</p>"
            ),
            id = sector.id,
            kind = sector.control.as_str(),
            threat = sector.threat,
        );
        if let Some(deposit) = sector.resources {
            out.push_str("<p>Resources Available:</p><ul>");
            for (kind, value) in deposit.entries() {
                let _ = write!(out, "<li>{}: {}</li>", kind.key(), value);
            }
            out.push_str("</ul>");
        }
        out.push_str("</div>");
    }
    out
}

fn unit_card(unit: &Unit) -> String {
    format!(
        concat!(
            r#"<div class="unit-card {kind}">"#,
            r#"<div class="unit-header"><h4>{name}</h4><span>Level {level}</span></div>"#,
            "<p>{description}</p>",
            r#"<div class="stats"><span>ATK: {attack}</span><span>DEF: {defense}</span></div>"#,
            r#"<div class="experience"><span>Experience</span><span>{xp} / {max_xp}</span>"#,
            r#"<div class="bar"><div class="fill" style="{width}"></div></div></div>"#,
            "</div>"
        ),
        kind = unit.kind.as_str(),
        name = escape(&unit.name),
        level = unit.level,
        description = escape(&unit.description),
        attack = unit.attack,
        defense = unit.defense,
        xp = unit.experience,
        max_xp = unit.max_experience,
        width = bar_width(unit.experience_ratio()),
    )
}

pub fn units_panel(units: &[Unit]) -> String {
    let mut out = String::from(r#"<h3 class="panel-title units">AI Units</h3><div class="unit-list">"#);
    for unit in units {
        out.push_str(&unit_card(unit));
    }
    out.push_str("</div>");
    out
}

fn quest_card(quest: &Quest) -> String {
    let rewards = quest
        .rewards
        .entries()
        .into_iter()
        .map(|(key, value)| format!("<span>{}: +{}</span>", key, value))
        .collect::<String>();
    format!(
        concat!(
            r#"<div class="quest-card">"#,
            r#"<div class="quest-header"><div><h4>{title}</h4><p>{description}</p></div>"#,
            r#"<span class="difficulty {difficulty}">{difficulty}</span></div>"#,
            r#"<div class="progress"><span>Progress</span><span>{progress}%</span>"#,
            r#"<div class="bar"><div class="fill" style="{width}"></div></div></div>"#,
            r#"<div class="rewards"><h5>Rewards:</h5>{rewards}</div>"#,
            "</div>"
        ),
        title = escape(&quest.title),
        description = escape(&quest.description),
        difficulty = quest.difficulty.as_str(),
        progress = quest.progress,
        width = bar_width(quest.progress_pct() / 100.0),
        rewards = rewards,
    )
}

pub fn quests_panel(quests: &[Quest]) -> String {
    let mut out = String::from(r#"<h3 class="panel-title quests">Active Quests</h3><div class="quest-list">"#);
    for quest in quests {
        out.push_str(&quest_card(quest));
    }
    out.push_str("</div>");
    out
}

pub fn research_panel() -> String {
    r#"<h3 class="panel-title research">Research Lab</h3><p>Research module coming soon...</p>"#
        .to_string()
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<label class="setting-row">{}<input type="checkbox" data-setting="{}"{}></label>"#,
        label,
        name,
        if checked { " checked" } else { "" }
    )
}

fn slider(name: &str, label: &str, value: u8, enabled: bool) -> String {
    format!(
        r#"<label class="setting-slider">{}<input type="range" min="0" max="100" value="{}" data-setting="{}"{}></label>"#,
        label,
        value,
        name,
        if enabled { "" } else { " disabled" }
    )
}

fn select(name: &str, label: &str, options: &[(&str, &str)], current: &str) -> String {
    let options = options
        .iter()
        .map(|(value, text)| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                value,
                if *value == current { " selected" } else { "" },
                text
            )
        })
        .collect::<String>();
    format!(
        r#"<label class="setting-row">{}<select data-setting="{}">{}</select></label>"#,
        label, name, options
    )
}

pub fn settings_panel(settings: &GameSettings) -> String {
    let volume_enabled = settings.volume_controls_enabled();
    let qualities: Vec<(&str, &str)> = GraphicsQuality::ALL
        .iter()
        .map(|q| (q.as_str(), q.label()))
        .collect();
    let themes: Vec<(&str, &str)> = Theme::ALL.iter().map(|t| (t.as_str(), t.label())).collect();

    let mut out = String::from(r#"<h3 class="panel-title settings">Game Settings</h3>"#);
    out.push_str(r#"<section><h4>Audio</h4>"#);
    out.push_str(&checkbox("soundEnabled", "Enable Sound", settings.sound_enabled));
    out.push_str(&slider("musicVolume", "Music Volume", settings.music_volume, volume_enabled));
    out.push_str(&slider("sfxVolume", "SFX Volume", settings.sfx_volume, volume_enabled));
    out.push_str("</section><section><h4>Graphics</h4>");
    out.push_str(&select(
        "graphicsQuality",
        "Quality",
        &qualities,
        settings.graphics_quality.as_str(),
    ));
    out.push_str(&select("theme", "Theme", &themes, settings.theme.as_str()));
    out.push_str("</section><section><h4>Game</h4>");
    out.push_str(&checkbox("autoSave", "Auto Save", settings.auto_save));
    out.push_str(&checkbox("notifications", "Notifications", settings.notifications));
    out.push_str("</section>");
    out
}

pub fn notification_feed(feed: &NotificationFeed, now: f64) -> String {
    let mut out = String::from(r#"<h3 class="panel-title notifications">Notifications</h3>"#);
    for note in feed.iter() {
        let _ = write!(
            out,
            r#"<div class="notification {}" data-notification="{}"><span>{}</span><span class="age">{}</span></div>"#,
            note.severity.as_str(),
            note.id,
            escape(&note.message),
            note.age_label(now)
        );
    }
    out
}

pub fn help_overlay(help: &HelpOverlay) -> String {
    let mut out = String::from(r#"<button class="help-button" data-help="open">?</button>"#);
    if !help.is_open() {
        return out;
    }

    out.push_str(concat!(
        r#"<div class="help-backdrop"><div class="help-dialog">"#,
        r#"<div class="help-header"><h2>Game Guide</h2>"#,
        r#"<button class="help-close" data-help="close">&times;</button></div>"#,
        r#"<div class="help-body"><nav>"#
    ));
    for (index, section) in HELP_SECTIONS.iter().enumerate() {
        let class = if index == help.active_index() { "active" } else { "" };
        let _ = write!(
            out,
            r#"<button class="{}" data-help-section="{}">{}</button>"#,
            class, index, section.title
        );
    }
    let section = help.active_section();
    let _ = write!(
        out,
        r#"</nav><article><h3>{}</h3><p>{}</p></article></div>"#,
        section.title, section.content
    );
    out.push_str(concat!(
        r#"<div class="help-footer">Tip: Press '?' key anytime to open this help overlay</div>"#,
        "</div></div>"
    ));
    out
}
