//! Request and response types exchanged with the mutation worker.
//!
//! Every request is a batch keyed by item identifiers. Requests capture the
//! current trace context when built so spans recorded on the worker thread are
//! linked to the dispatching span.

use crate::domain::PhotoDetail;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is not valid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! mutation_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl MutationRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

mutation_request_builders! {
    set_favorite(SetFavorite { image_hashes: Vec<String>, favorite: bool }),
    set_hidden(SetHidden { image_hashes: Vec<String>, hidden: bool }),
    set_public(SetPublic { image_hashes: Vec<String>, val_public: bool }),
    mark_deleted(MarkDeleted { image_hashes: Vec<String>, deleted: bool }),
    download_archive(DownloadArchive { image_hashes: Vec<String> }),
    remove_from_album(RemoveFromAlbum { album_id: u64, title: String, image_hashes: Vec<String> }),
    label_faces(LabelFaces { face_ids: Vec<u64>, person_name: String }),
    delete_faces(DeleteFaces { face_ids: Vec<u64> }),
    refresh_photo_details(RefreshPhotoDetails { image_hash: String }),
}

/// Outbound requests handled by the mutation service.
///
/// Requests built under different spans compare unequal because of their
/// trace context. Without an OpenTelemetry layer the context is always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationRequest {
    /// Set or clear the favorite flag.
    SetFavorite {
        image_hashes: Vec<String>,
        favorite: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Hide or unhide photos.
    SetHidden {
        image_hashes: Vec<String>,
        hidden: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Make photos public or private.
    SetPublic {
        image_hashes: Vec<String>,
        val_public: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Move photos to or out of the trash.
    MarkDeleted {
        image_hashes: Vec<String>,
        deleted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Request a downloadable archive.
    DownloadArchive {
        image_hashes: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove photos from a user album.
    RemoveFromAlbum {
        album_id: u64,
        title: String,
        image_hashes: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Assign a person label to faces.
    LabelFaces {
        face_ids: Vec<u64>,
        person_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Delete face detections.
    DeleteFaces {
        face_ids: Vec<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Re-fetch the details of one photo.
    RefreshPhotoDetails {
        image_hash: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl MutationRequest {
    /// Short operation name used in logs and outcome messages.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::SetFavorite { .. } => "set favorite",
            Self::SetHidden { .. } => "set hidden",
            Self::SetPublic { .. } => "set public",
            Self::MarkDeleted { .. } => "mark deleted",
            Self::DownloadArchive { .. } => "download archive",
            Self::RemoveFromAlbum { .. } => "remove from album",
            Self::LabelFaces { .. } => "label faces",
            Self::DeleteFaces { .. } => "delete faces",
            Self::RefreshPhotoDetails { .. } => "refresh photo details",
        }
    }

    /// Number of items the request touches.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::SetFavorite { image_hashes, .. }
            | Self::SetHidden { image_hashes, .. }
            | Self::SetPublic { image_hashes, .. }
            | Self::MarkDeleted { image_hashes, .. }
            | Self::DownloadArchive { image_hashes, .. }
            | Self::RemoveFromAlbum { image_hashes, .. } => image_hashes.len(),
            Self::LabelFaces { face_ids, .. } | Self::DeleteFaces { face_ids, .. } => face_ids.len(),
            Self::RefreshPhotoDetails { .. } => 1,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::SetFavorite { trace_context, .. }
            | Self::SetHidden { trace_context, .. }
            | Self::SetPublic { trace_context, .. }
            | Self::MarkDeleted { trace_context, .. }
            | Self::DownloadArchive { trace_context, .. }
            | Self::RemoveFromAlbum { trace_context, .. }
            | Self::LabelFaces { trace_context, .. }
            | Self::DeleteFaces { trace_context, .. }
            | Self::RefreshPhotoDetails { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Outcomes reported by the worker to an optional listener.
///
/// The dispatcher never reads these; a host may forward them to its global
/// notification mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServiceResponse {
    /// The request was accepted by the server.
    Completed {
        operation: String,
        item_count: usize,
    },

    /// Fresh photo details were fetched.
    PhotoDetailsLoaded {
        detail: PhotoDetail,
    },

    /// The request failed.
    Error {
        operation: String,
        message: String,
    },
}
