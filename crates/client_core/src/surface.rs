//! Rendering capability injected into the UI controller.

use std::{collections::HashMap, fmt};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    LoadingIndicator,
    ResultsContainer,
    ErrorPanel,
    TickerOutput,
    AdviceOutput,
    RatiosList,
    OutputContainer,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Element::LoadingIndicator,
        Element::ResultsContainer,
        Element::ErrorPanel,
        Element::TickerOutput,
        Element::AdviceOutput,
        Element::RatiosList,
        Element::OutputContainer,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Element::LoadingIndicator => "loading-spinner",
            Element::ResultsContainer => "results-container",
            Element::ErrorPanel => "error-message",
            Element::TickerOutput => "result-ticker",
            Element::AdviceOutput => "output-advice",
            Element::RatiosList => "fundamental-ratios",
            Element::OutputContainer => "output",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("missing element {0}")]
    MissingElement(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBlock {
    pub heading: String,
    pub advice_line: String,
    pub ratios_heading: String,
    pub ratio_lines: Vec<String>,
}

impl SummaryBlock {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.heading.clone(),
            self.advice_line.clone(),
            self.ratios_heading.clone(),
        ];
        lines.extend(self.ratio_lines.iter().map(|line| format!("  - {line}")));
        lines
    }
}

pub trait UiSurface: Send {
    fn contains(&self, element: Element) -> bool;
    fn set_visible(&mut self, element: Element, visible: bool) -> Result<(), SurfaceError>;
    fn set_text(&mut self, element: Element, text: &str) -> Result<(), SurfaceError>;
    fn set_list(&mut self, element: Element, items: &[String]) -> Result<(), SurfaceError>;
    fn set_summary(&mut self, element: Element, summary: &SummaryBlock)
        -> Result<(), SurfaceError>;
    fn mark_error(&mut self, element: Element) -> Result<(), SurfaceError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub visible: bool,
    pub text: Option<String>,
    pub items: Vec<String>,
    pub summary: Option<SummaryBlock>,
    pub error_styled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceWrite {
    Visibility(Element, bool),
    Text(Element),
    List(Element),
    Summary(Element),
    ErrorStyle(Element),
}

#[derive(Debug, Clone)]
pub struct MemorySurface {
    elements: HashMap<Element, ElementState>,
    journal: Vec<SurfaceWrite>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::with_elements(Element::ALL)
    }

    pub fn with_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: elements
                .into_iter()
                .map(|element| (element, ElementState::default()))
                .collect(),
            journal: Vec::new(),
        }
    }

    pub fn without(missing: &[Element]) -> Self {
        Self::with_elements(
            Element::ALL
                .into_iter()
                .filter(|element| !missing.contains(element)),
        )
    }

    pub fn element(&self, element: Element) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.element(element).is_some_and(|state| state.visible)
    }

    pub fn text(&self, element: Element) -> Option<&str> {
        self.element(element).and_then(|state| state.text.as_deref())
    }

    pub fn items(&self, element: Element) -> &[String] {
        self.element(element)
            .map(|state| state.items.as_slice())
            .unwrap_or_default()
    }

    pub fn summary(&self, element: Element) -> Option<&SummaryBlock> {
        self.element(element).and_then(|state| state.summary.as_ref())
    }

    pub fn journal(&self) -> &[SurfaceWrite] {
        &self.journal
    }

    fn state_mut(&mut self, element: Element) -> Result<&mut ElementState, SurfaceError> {
        self.elements
            .get_mut(&element)
            .ok_or(SurfaceError::MissingElement(element))
    }
}

impl UiSurface for MemorySurface {
    fn contains(&self, element: Element) -> bool {
        self.elements.contains_key(&element)
    }

    fn set_visible(&mut self, element: Element, visible: bool) -> Result<(), SurfaceError> {
        self.state_mut(element)?.visible = visible;
        self.journal.push(SurfaceWrite::Visibility(element, visible));
        Ok(())
    }

    fn set_text(&mut self, element: Element, text: &str) -> Result<(), SurfaceError> {
        self.state_mut(element)?.text = Some(text.to_string());
        self.journal.push(SurfaceWrite::Text(element));
        Ok(())
    }

    fn set_list(&mut self, element: Element, items: &[String]) -> Result<(), SurfaceError> {
        self.state_mut(element)?.items = items.to_vec();
        self.journal.push(SurfaceWrite::List(element));
        Ok(())
    }

    fn set_summary(
        &mut self,
        element: Element,
        summary: &SummaryBlock,
    ) -> Result<(), SurfaceError> {
        self.state_mut(element)?.summary = Some(summary.clone());
        self.journal.push(SurfaceWrite::Summary(element));
        Ok(())
    }

    fn mark_error(&mut self, element: Element) -> Result<(), SurfaceError> {
        self.state_mut(element)?.error_styled = true;
        self.journal.push(SurfaceWrite::ErrorStyle(element));
        Ok(())
    }
}
