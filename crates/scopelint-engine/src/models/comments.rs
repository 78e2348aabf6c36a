use std::collections::BTreeSet;

/// Prefix of in-document comment directives.
pub const DIRECTIVE: &str = "scopelint";

/// Checking switches collected from comments seen so far in a document.
///
/// - `scopelint off` / `scopelint on` toggle all checks
/// - `scopelint Some.Rule = NO` / `= YES` toggle a single check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentState {
    off: bool,
    disabled: BTreeSet<String>,
}

impl CommentState {
    /// Applies a comment body; anything that isn't a directive is ignored.
    pub fn update(&mut self, comment: &str) {
        let Some(rest) = comment.trim().strip_prefix(DIRECTIVE) else {
            return;
        };
        match rest.trim() {
            "off" => self.off = true,
            "on" => self.off = false,
            setting => {
                let Some((rule, value)) = setting.split_once('=') else {
                    return;
                };
                let rule = rule.trim().to_string();
                match value.trim() {
                    "NO" => {
                        self.disabled.insert(rule);
                    }
                    "YES" => {
                        self.disabled.remove(&rule);
                    }
                    _ => {}
                }
            }
        }
    }

    pub fn is_off(&self) -> bool {
        self.off
    }

    /// Whether `check` may report at this point of the document.
    pub fn allows(&self, check: &str) -> bool {
        !self.off && !self.disabled.contains(check)
    }
}
