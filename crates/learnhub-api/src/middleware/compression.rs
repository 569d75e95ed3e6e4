//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Build the standard gzip compression layer.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
