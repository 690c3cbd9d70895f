use crate::{band::BandKind, lattice::VertexId};

/// Errors produced while planning a tour.  Every error is fatal for the run
/// that produced it: the pipeline is deterministic, so retrying with the
/// same configuration reproduces the same failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    /// Bad lattice dimensions or terminal coordinates.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    /// A band could not be made Eulerian.
    #[error("balancing the {band} band failed at vertex {vertex}: {reason}")]
    BalancingFailed {
        band: BandKind,
        vertex: VertexId,
        reason: String,
    },
    /// Extraction finished without producing a walk over every edge.
    #[error(
        "traversal of the {band} band is incomplete at vertex {vertex}: {detail} \
         ({remaining_edges} edges left)"
    )]
    IncompleteTraversal {
        band: BandKind,
        vertex: VertexId,
        remaining_edges: usize,
        detail: &'static str,
    },
}

impl TourError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        TourError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type TourResult<T> = Result<T, TourError>;
