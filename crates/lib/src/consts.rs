//! Shared constants.

/// Number of hex characters kept from a SHA-256 when forming an object hash.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Region the site certificate must be provisioned in. CloudFront only
/// accepts viewer certificates from us-east-1, no matter where the rest of
/// the stack lives.
pub const CERTIFICATE_REGION: &str = "us-east-1";

/// Fixed hosted zone id every CloudFront distribution is addressed under
/// when targeted by a Route53 alias record.
pub const CLOUDFRONT_ALIAS_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// Document served for directory requests.
pub const INDEX_DOCUMENT: &str = "index.html";

/// Document served for error responses.
pub const ERROR_DOCUMENT: &str = "error.html";

/// Managed "caching optimized" cache policy id.
pub const CACHING_OPTIMIZED_POLICY_ID: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

/// Invalidation pattern covering the entire distribution cache.
pub const INVALIDATE_ALL: &str = "/*";
