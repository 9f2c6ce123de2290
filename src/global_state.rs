use leptos::*;
use once_cell::sync::OnceCell;

use crate::domain::{
    accessibility::{AccessibilityPreferences, AnnouncementEvent},
    intelligence::OverviewViewModel,
    navigation::Route,
    notifications::Toast,
    retry::FetchPhase,
    state::Loadable,
};

pub struct Globals {
    pub route: RwSignal<Route>,
    pub overview: RwSignal<Loadable<OverviewViewModel>>,
    pub fetch_phase: RwSignal<FetchPhase>,
    pub preferences: RwSignal<AccessibilityPreferences>,
    pub announcements: RwSignal<Vec<AnnouncementEvent>>,
    pub toasts: RwSignal<Vec<Toast>>,
    pub banner_dismissed: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        route: create_rw_signal(Route::default()),
        overview: create_rw_signal(Loadable::Loading),
        fetch_phase: create_rw_signal(FetchPhase::Idle),
        preferences: create_rw_signal(AccessibilityPreferences::default()),
        announcements: create_rw_signal(Vec::new()),
        toasts: create_rw_signal(Vec::new()),
        banner_dismissed: create_rw_signal(false),
    })
}

crate::global_signals! {
    pub current_route => route: Route,
    pub overview_state => overview: Loadable<OverviewViewModel>,
    pub fetch_phase => fetch_phase: FetchPhase,
    pub preferences => preferences: AccessibilityPreferences,
    pub announcements => announcements: Vec<AnnouncementEvent>,
    pub toasts => toasts: Vec<Toast>,
    pub banner_dismissed => banner_dismissed: bool,
}
