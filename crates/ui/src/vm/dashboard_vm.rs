use fahm_core::UnitState;
use fahm_core::model::level::LEVELS_PER_UNIT;
use fahm_core::model::{ExamId, Tier};
use services::{Dashboard, ExamTab};

/// What a world card offers when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldAction {
    Start,
    Review,
    Upgrade,
}

impl WorldAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start Practice",
            Self::Review => "✓ Completed",
            Self::Upgrade => "Upgrade to unlock",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldCardVm {
    pub position: u32,
    pub label: String,
    pub title: String,
    pub subject_line: String,
    pub locked: bool,
    pub progress_percent: u8,
    /// `None` while locked; locked cards hide their progress bar.
    pub progress_label: Option<String>,
    pub unlock_hint: Option<String>,
    pub action: WorldAction,
    /// Cumulative level sizes; empty for locked worlds.
    pub levels: Vec<String>,
}

impl From<&UnitState> for WorldCardVm {
    fn from(state: &UnitState) -> Self {
        let unit = &state.unit;
        let action = if state.locked {
            WorldAction::Upgrade
        } else if state.progress.is_completed() {
            WorldAction::Review
        } else {
            WorldAction::Start
        };
        let percent = state.progress.percent();
        let levels = if state.locked {
            Vec::new()
        } else {
            (1..=LEVELS_PER_UNIT)
                .filter_map(|level| {
                    unit.level_range(level)
                        .map(|range| format!("Level {level} · {} questions", range.end))
                })
                .collect()
        };
        Self {
            position: unit.position(),
            label: format!("World {}", unit.number()),
            title: unit.title().to_owned(),
            subject_line: format!("{} · {} questions", unit.subject(), unit.item_count()),
            locked: state.locked,
            progress_percent: percent,
            progress_label: (!state.locked).then(|| format!("Progress: {percent}%")),
            unlock_hint: state
                .unlocked_by
                .filter(|_| state.locked)
                .map(|tier| format!("Included in {}", capitalize(tier.as_str()))),
            action,
            levels,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradePromptVm {
    pub heading: String,
    pub body: String,
    pub cta: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamTabVm {
    pub id: ExamId,
    pub name: String,
    pub selected: bool,
}

impl From<&ExamTab> for ExamTabVm {
    fn from(tab: &ExamTab) -> Self {
        Self {
            id: tab.id.clone(),
            name: tab.name.clone(),
            selected: tab.selected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub exam_id: ExamId,
    pub exam_name: String,
    pub tier_label: String,
    pub access_line: String,
    pub completed_line: String,
    pub notice: Option<String>,
    pub worlds: Vec<WorldCardVm>,
    pub exam_tabs: Vec<ExamTabVm>,
    pub upgrade_prompt: Option<UpgradePromptVm>,
    pub show_upgrade_button: bool,
}

#[must_use]
pub fn map_dashboard(dashboard: &Dashboard) -> DashboardVm {
    let greeting = match dashboard.display_name.as_deref() {
        Some(name) => format!("Welcome back, {name}"),
        None => "Welcome back".to_owned(),
    };
    let tier_label = dashboard.plan.as_ref().map_or_else(
        || capitalize(dashboard.tier.as_str()),
        |plan| plan.display_name.clone(),
    );
    let access_line = match dashboard.unlocked_count {
        0 => "No worlds available yet".to_owned(),
        1 => "Access to world 1".to_owned(),
        n => format!("Access to worlds 1-{n}"),
    };
    let notice = dashboard.fell_back_from.as_ref().map(|missing| {
        format!(
            "Exam `{missing}` is not available; showing {} instead.",
            dashboard.exam_name
        )
    });

    let any_locked = dashboard.units.iter().any(|state| state.locked);
    let upgrade_prompt = (dashboard.tier == Tier::Free && any_locked).then(|| {
        let names: Vec<&str> = dashboard
            .upgrade_options
            .iter()
            .map(|plan| plan.display_name.as_str())
            .collect();
        UpgradePromptVm {
            heading: format!("Unlock all {} worlds", dashboard.units.len()),
            body: format!(
                "Upgrade to {} to access advanced practice and complete mastery",
                names.join(" or ")
            ),
            cta: "View Pricing Plans",
        }
    });

    DashboardVm {
        greeting,
        exam_id: dashboard.exam_id.clone(),
        exam_name: dashboard.exam_name.clone(),
        tier_label,
        access_line,
        completed_line: format!(
            "{} of {} worlds completed",
            dashboard.completed_count(),
            dashboard.units.len()
        ),
        notice,
        worlds: dashboard.units.iter().map(WorldCardVm::from).collect(),
        exam_tabs: dashboard.exam_tabs.iter().map(ExamTabVm::from).collect(),
        upgrade_prompt,
        show_upgrade_button: !dashboard.upgrade_options.is_empty(),
    }
}

pub(crate) fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
