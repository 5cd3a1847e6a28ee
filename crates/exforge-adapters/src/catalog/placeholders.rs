//! `{{NAME}}` substitution over the static sources.

use exforge_core::domain::{ConfigurationRecord, EnvKey, encoding::js_string};

/// Values a source may reference, all derived from one record.
pub(super) struct Placeholders {
    values: Vec<(String, String)>,
}

impl Placeholders {
    pub(super) fn for_record(config: &ConfigurationRecord) -> Self {
        let mut values = Vec::with_capacity(EnvKey::ALL.len() * 2 + 1);

        for key in EnvKey::ALL {
            let literal = match key {
                // Ports are embedded as numbers
                EnvKey::Port | EnvKey::DbPort => key.value_in(config),
                _ => js_string(&key.value_in(config)),
            };
            values.push((key.as_str().to_string(), literal));
            values.push((format!("env.{}", key.as_str()), key.js_ref()));
        }
        values.push(("SYNCHRONIZE".into(), config.synchronize().to_string()));

        Self { values }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace every known `{{NAME}}` in `source`.
    ///
    /// Single pass: substituted values are never rescanned. Unknown names are
    /// left in place verbatim.
    pub(super) fn fill(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => match self.lookup(&after[..end]) {
                    Some(value) => {
                        out.push_str(value);
                        rest = &after[end + 2..];
                    }
                    None => {
                        out.push_str("{{");
                        rest = after;
                    }
                },
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}
