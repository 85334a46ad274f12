// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default line-height measurement.
//!
//! Browsers report some wheel events in lines rather than pixels and do not
//! expose how tall a line is. The probe renders one line of default text in a
//! hidden, same-origin frame (so page styles do not leak in) and reads its
//! height.

use tracing::{debug, warn};
use understory_viewbox::DEFAULT_LINE_HEIGHT;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlIFrameElement};

use crate::error::ProbeError;

const PROBE_ID: &str = "understory-viewbox-line-probe";
const PROBE_MARKUP: &str =
    "<head></head><body><span id=\"understory-viewbox-line-probe\">M</span></body>";
const FRAME_STYLE: &str =
    "position:absolute;visibility:hidden;width:0;height:0;border:0;left:-9999px;top:-9999px";

/// Measures the document's default text line height in CSS pixels.
///
/// The frame is removed again before returning, whether or not the
/// measurement succeeded.
pub fn measure_line_height(document: &Document) -> Result<f64, ProbeError> {
    let body = document.body().ok_or(ProbeError::FrameUnavailable)?;
    let frame: HtmlIFrameElement = document
        .create_element("iframe")
        .ok()
        .and_then(|el| el.dyn_into().ok())
        .ok_or(ProbeError::FrameUnavailable)?;
    let _ = frame.set_attribute("style", FRAME_STYLE);
    let _ = frame.set_attribute("aria-hidden", "true");
    body.append_child(&frame)
        .map_err(|_| ProbeError::FrameUnavailable)?;

    let measured = measure_in_frame(&frame);
    frame.remove();

    let height = measured?;
    if height.is_finite() && height > 0.0 {
        debug!(height, "measured wheel line height");
        Ok(height)
    } else {
        warn!(height, "line probe has no height, using the default");
        Ok(DEFAULT_LINE_HEIGHT)
    }
}

fn measure_in_frame(frame: &HtmlIFrameElement) -> Result<f64, ProbeError> {
    let document = frame
        .content_document()
        .ok_or(ProbeError::FrameUnavailable)?;
    let root = document
        .document_element()
        .ok_or(ProbeError::FrameUnavailable)?;
    root.set_inner_html(PROBE_MARKUP);
    let probe = document
        .get_element_by_id(PROBE_ID)
        .ok_or(ProbeError::ProbeMissing)?;
    Ok(probe.get_bounding_client_rect().height())
}
