use std::fmt;

/// Structured metric key: a base name plus ordered dimension segments.
///
/// Keys are compared and hashed on the structured form; the flat
/// `name_dim1_dim2` string exists only at the export boundary. This keeps
/// dynamically-built names (per feature, per endpoint) from colliding with
/// each other or with fixed metric names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey {
    name: String,
    dims: Vec<String>,
}

impl MetricKey {
    /// Key with no dimensions.
    #[must_use]
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dims: Vec::new(),
        }
    }

    /// Key with a single dimension.
    #[must_use]
    pub fn with_dim(name: impl Into<String>, dim: &str) -> Self {
        Self::with_dims(name, &[dim])
    }

    /// Key with multiple ordered dimensions.
    ///
    /// Dimension values are lowercased and sanitized so `"Payment"` and
    /// `"payment"` share a key and endpoint paths render as valid metric
    /// name segments.
    #[must_use]
    pub fn with_dims(name: impl Into<String>, dims: &[&str]) -> Self {
        Self {
            name: name.into(),
            dims: dims.iter().map(|d| sanitize(d)).collect(),
        }
    }

    /// Base metric name, without dimensions.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimension segments, in order.
    #[must_use]
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Render the flat exposition name (`name_dim1_dim2`).
    #[must_use]
    pub fn render(&self) -> String {
        if self.dims.is_empty() {
            self.name.clone()
        } else {
            format!("{}_{}", self.name, self.dims.join("_"))
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Lowercase and map anything outside `[a-z0-9]` to `_`.
fn sanitize(dim: &str) -> String {
    dim.chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_global_and_dimensioned_keys() {
        assert_eq!(MetricKey::global("tests_passed_total").render(), "tests_passed_total");
        assert_eq!(
            MetricKey::with_dim("tests_passed", "Payment").render(),
            "tests_passed_payment"
        );
        assert_eq!(
            MetricKey::with_dims("api_response_time", &["GET", "/payments/status"]).render(),
            "api_response_time_get__payments_status"
        );
    }

    #[test]
    fn structured_keys_do_not_collide_with_flat_names() {
        let flat = MetricKey::global("tests_passed_payment");
        let dimensioned = MetricKey::with_dim("tests_passed", "payment");
        assert_ne!(flat, dimensioned);
        assert_eq!(flat.render(), dimensioned.render());
    }

    #[test]
    fn dimensions_are_case_insensitive() {
        assert_eq!(
            MetricKey::with_dim("tests_failed", "CHECKOUT"),
            MetricKey::with_dim("tests_failed", "checkout")
        );
    }
}
