//! Finite-state UI controller: `Idle -> Loading -> {Success, Error} -> Idle`.

use tracing::{debug, warn};

use crate::{
    presenter,
    surface::{Element, UiSurface},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

pub struct UiStateController<S> {
    state: UiState,
    surface: S,
}

impl<S: UiSurface> UiStateController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            state: UiState::Idle,
            surface,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn enter_loading(&mut self) {
        self.show(Element::LoadingIndicator, true);
        self.show(Element::ResultsContainer, false);
        self.show(Element::ErrorPanel, false);
        self.transition(UiState::Loading);
    }

    pub fn enter_success(&mut self) {
        if self.state != UiState::Loading && self.state != UiState::Success {
            warn!(from = ?self.state, "entering success outside of a pending request");
        }
        self.show(Element::LoadingIndicator, false);
        self.show(Element::ResultsContainer, true);
        self.transition(UiState::Success);
    }

    pub fn enter_error(&mut self, message: &str) {
        self.show(Element::LoadingIndicator, false);
        self.show(Element::ResultsContainer, false);
        presenter::present(&mut self.surface, message);
        self.transition(UiState::Error(message.to_string()));
    }

    pub fn reset(&mut self) {
        self.show(Element::LoadingIndicator, false);
        self.show(Element::ResultsContainer, false);
        self.show(Element::ErrorPanel, false);
        self.transition(UiState::Idle);
    }

    fn show(&mut self, element: Element, visible: bool) {
        if let Err(err) = self.surface.set_visible(element, visible) {
            debug!("skipping visibility update: {err}");
        }
    }

    fn transition(&mut self, next: UiState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "ui state transition");
        }
        self.state = next;
    }
}
