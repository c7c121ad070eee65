use std::io::{self, Write};

use client_core::{Element, MemorySurface, SummaryBlock, SurfaceError, UiSurface};

const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

pub struct TerminalSurface {
    page: MemorySurface,
    color: bool,
}

impl TerminalSurface {
    pub fn new(color: bool) -> Self {
        Self {
            page: MemorySurface::new(),
            color,
        }
    }

    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        if self.page.is_visible(Element::LoadingIndicator) {
            self.styled(out, DIM, "Analyzing...")?;
        }

        if self.page.is_visible(Element::ResultsContainer)
            && self.page.is_visible(Element::OutputContainer)
        {
            if let Some(summary) = self.page.summary(Element::OutputContainer) {
                for line in summary.lines() {
                    writeln!(out, "{line}")?;
                }
            }
        }

        if self.page.is_visible(Element::ErrorPanel) {
            if let Some(state) = self.page.element(Element::ErrorPanel) {
                let text = state.text.as_deref().unwrap_or_default();
                if state.error_styled {
                    self.styled(out, RED, text)?;
                } else {
                    writeln!(out, "{text}")?;
                }
            }
        }

        out.flush()
    }

    fn styled(&self, out: &mut impl Write, style: &str, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(out, "{style}{text}{RESET}")
        } else {
            writeln!(out, "{text}")
        }
    }
}

impl UiSurface for TerminalSurface {
    fn contains(&self, element: Element) -> bool {
        self.page.contains(element)
    }

    fn set_visible(&mut self, element: Element, visible: bool) -> Result<(), SurfaceError> {
        self.page.set_visible(element, visible)
    }

    fn set_text(&mut self, element: Element, text: &str) -> Result<(), SurfaceError> {
        self.page.set_text(element, text)
    }

    fn set_list(&mut self, element: Element, items: &[String]) -> Result<(), SurfaceError> {
        self.page.set_list(element, items)
    }

    fn set_summary(
        &mut self,
        element: Element,
        summary: &SummaryBlock,
    ) -> Result<(), SurfaceError> {
        self.page.set_summary(element, summary)
    }

    fn mark_error(&mut self, element: Element) -> Result<(), SurfaceError> {
        self.page.mark_error(element)
    }
}
