// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use understory_viewbox::ViewBoxError;

/// The hidden-frame line-height measurement could not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeError {
    /// The iframe could not be created, attached, or given a document.
    FrameUnavailable,
    /// The probe element was not found after writing the frame document.
    ProbeMissing,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameUnavailable => f.write_str("could not create the line-height probe frame"),
            Self::ProbeMissing => f.write_str("line-height probe element not found"),
        }
    }
}

impl core::error::Error for ProbeError {}

/// Failure while binding a viewport to an `<svg>` element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupError {
    /// No global `window` or `document` (not running in a browser page).
    NoWindow,
    /// The element's `viewBox` attribute is absent or unusable.
    ViewBox(ViewBoxError),
    /// Measuring the wheel line height failed.
    Probe(ProbeError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no browser window or document"),
            Self::ViewBox(err) => write!(f, "invalid viewBox: {err}"),
            Self::Probe(err) => write!(f, "line-height probe failed: {err}"),
        }
    }
}

impl core::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::NoWindow => None,
            Self::ViewBox(err) => Some(err),
            Self::Probe(err) => Some(err),
        }
    }
}

impl From<ViewBoxError> for SetupError {
    fn from(err: ViewBoxError) -> Self {
        Self::ViewBox(err)
    }
}

impl From<ProbeError> for SetupError {
    fn from(err: ProbeError) -> Self {
        Self::Probe(err)
    }
}
