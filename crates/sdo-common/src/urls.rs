//! URL templates of the image API.
//!
//! Templates use indexed placeholders: `{0}` image size, `{1}` wavelength,
//! `{2}` start time and `{3}` parameter id. `{base}` is the API root.

/// Root of the public DMLAB image API.
pub const DEFAULT_BASE_URL: &str = "http://dmlab.cs.gsu.edu/dmlabapi";

/// Full-disk JPEG image of one passband.
pub const AIA_IMAGE_JPEG_PATH: &str = "{base}/images/SDO/AIA/{0}/{1}/?starttime={2}";

/// JPEG heat map of one image parameter.
pub const AIA_IMAGEPARAM_JPEG_PATH: &str = "{base}/images/SDO/AIA/param/{0}/{1}/{3}/?starttime={2}";

/// A URL template with positional placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlTemplate(&'static str);

impl UrlTemplate {
    pub const IMAGE: UrlTemplate = UrlTemplate(AIA_IMAGE_JPEG_PATH);
    pub const IMAGE_PARAM: UrlTemplate = UrlTemplate(AIA_IMAGEPARAM_JPEG_PATH);

    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Substitute `{base}` and `{N}` placeholders.
    ///
    /// Placeholders without a matching argument are left untouched. Values are
    /// inserted verbatim.
    pub fn format(&self, base: &str, args: &[&str]) -> String {
        let base = base.trim_end_matches('/');
        let mut out = String::with_capacity(self.0.len() + base.len() + 32);
        let mut rest = self.0;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let key = &after[..close];
            let value = if key == "base" {
                Some(base)
            } else {
                key.parse::<usize>().ok().and_then(|i| args.get(i).copied())
            };
            match value {
                Some(v) => out.push_str(v),
                None => out.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}
