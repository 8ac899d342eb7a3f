//! Deterministic resource identity derivation.
//!
//! Every resource in a stack takes its identity from the configured resource
//! prefix plus a role label. Distinct roles yield distinct identifiers, so
//! identities cannot collide within one stack.

/// Derive the unique identifier for a resource role within a stack.
pub fn identify(prefix: &str, role: &str) -> String {
  format!("{prefix}-{role}")
}

/// Derive the template-safe logical id for a resource role.
///
/// Template logical ids must be alphanumeric, so the `identify` form is
/// CamelCased with punctuation stripped: `("ecme", "site-bucket")` becomes
/// `EcmeSiteBucket`.
pub fn logical_id(prefix: &str, role: &str) -> String {
  camelize(&identify(prefix, role))
}

fn camelize(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut upper_next = true;
  for c in s.chars() {
    if c.is_ascii_alphanumeric() {
      if upper_next {
        out.push(c.to_ascii_uppercase());
        upper_next = false;
      } else {
        out.push(c);
      }
    } else {
      upper_next = true;
    }
  }
  out
}
