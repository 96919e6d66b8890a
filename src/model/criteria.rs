/// Structural constraints applied to a catalog scan.
///
/// `None` on any optional field means "no constraint", never "match the empty
/// string". Built through the `with_*` methods, which treat blank values as
/// absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub region: String,
    pub family: Option<String>,
    pub service_name: Option<String>,
    pub product_name: Option<String>,
    pub product_name_contains: Option<String>,
    pub price_type: Option<String>,
    pub result_limit: Option<usize>,
    pub max_pages_to_scan: Option<usize>,
}

fn non_blank(value: Option<impl Into<String>>) -> Option<String> {
    value
        .map(Into::into)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FilterCriteria {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            family: None,
            service_name: None,
            product_name: None,
            product_name_contains: None,
            price_type: None,
            result_limit: None,
            max_pages_to_scan: None,
        }
    }

    pub fn with_family(mut self, family: Option<impl Into<String>>) -> Self {
        self.family = non_blank(family);
        self
    }

    pub fn with_service_name(mut self, service_name: Option<impl Into<String>>) -> Self {
        self.service_name = non_blank(service_name);
        self
    }

    pub fn with_product_name(mut self, product_name: Option<impl Into<String>>) -> Self {
        self.product_name = non_blank(product_name);
        self
    }

    pub fn with_product_name_contains(mut self, needle: Option<impl Into<String>>) -> Self {
        self.product_name_contains = non_blank(needle);
        self
    }

    pub fn with_price_type(mut self, price_type: Option<impl Into<String>>) -> Self {
        self.price_type = non_blank(price_type);
        self
    }

    /// Caps the number of distinct results; zero means no cap.
    pub fn with_result_limit(mut self, limit: Option<usize>) -> Self {
        self.result_limit = limit.filter(|l| *l > 0);
        self
    }

    /// Caps the number of pages fetched; zero means no cap.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages_to_scan = max_pages.filter(|p| *p > 0);
        self
    }
}
