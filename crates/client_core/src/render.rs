use shared::protocol::{AnalysisData, ResponsePayload};
use tracing::{debug, error, info, warn};

use crate::{
    error::{SubmitError, INVALID_RESPONSE_DATA},
    surface::{Element, SummaryBlock, UiSurface},
};

pub const NOT_AVAILABLE: &str = "N/A";

pub fn validate(response: ResponsePayload) -> Result<AnalysisData, SubmitError> {
    if !response.is_success() {
        let message = response
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| INVALID_RESPONSE_DATA.to_string());
        return Err(SubmitError::Schema(message));
    }

    let Some(data) = response.data else {
        error!("response carries no analysis data");
        return Err(SubmitError::invalid_structure());
    };
    if !data.is_object() {
        error!("analysis data is not an object");
        return Err(SubmitError::invalid_structure());
    }

    serde_json::from_value(data).map_err(|err| {
        error!("analysis data failed to decode: {err}");
        SubmitError::invalid_structure()
    })
}

pub fn render_response<S: UiSurface + ?Sized>(
    surface: &mut S,
    response: ResponsePayload,
) -> Result<AnalysisData, SubmitError> {
    let data = validate(response)?;
    render(surface, &data)?;
    Ok(data)
}

pub fn summary_block(data: &AnalysisData) -> SummaryBlock {
    SummaryBlock {
        heading: format!(
            "Stock Analysis for {}",
            or_not_available(data.ticker.as_deref())
        ),
        advice_line: format!("Advice: {}", or_not_available(data.advice.as_deref())),
        ratios_heading: "Fundamental Ratios:".to_string(),
        ratio_lines: data.fundamental_ratios.display_lines(),
    }
}

/// Writes validated data to the surface.
///
/// Ticker, advice and ratio outputs are optional. The output container is
/// required: without it rendering stops with [`SubmitError::Config`].
pub fn render<S: UiSurface + ?Sized>(
    surface: &mut S,
    data: &AnalysisData,
) -> Result<(), SubmitError> {
    let ticker = or_not_available(data.ticker.as_deref());
    let advice = or_not_available(data.advice.as_deref());
    debug!(ticker, advice, "updating ui with analysis data");

    if let Err(err) = surface.set_text(Element::TickerOutput, ticker) {
        warn!("ticker output unavailable: {err}");
    }
    if let Err(err) = surface.set_text(Element::AdviceOutput, advice) {
        debug!("advice output unavailable: {err}");
    }

    let ratio_lines = data.fundamental_ratios.display_lines();
    if let Err(err) = surface.set_list(Element::RatiosList, &ratio_lines) {
        debug!("ratio list unavailable: {err}");
    }

    if !surface.contains(Element::OutputContainer) {
        error!(
            element = %Element::OutputContainer,
            "required output container is missing"
        );
        return Err(SubmitError::Config(Element::OutputContainer));
    }

    let summary = summary_block(data);
    surface
        .set_summary(Element::OutputContainer, &summary)
        .and_then(|()| surface.set_visible(Element::OutputContainer, true))
        .map_err(|err| {
            error!("failed to write output container: {err}");
            SubmitError::Config(Element::OutputContainer)
        })?;

    info!(ticker, ratios = ratio_lines.len(), "rendered analysis");
    Ok(())
}

fn or_not_available(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => NOT_AVAILABLE,
    }
}
