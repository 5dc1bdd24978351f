//! Immutable endpoint descriptors

use types::EndpointError;

/// Which HTTP fetcher services an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherKind {
    /// The general-purpose logging fetcher
    Standard,
    /// The fast fetcher used for latency-sensitive lookups (summaries,
    /// profiles)
    Fast,
}

/// Which deserializer decodes an endpoint's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeserializerKind {
    /// The sports API XML deserializer
    SportsApiXml,
}

/// An immutable (URL template, fetcher kind, deserializer kind) triple.
///
/// Bound once, at catalog construction, to the configuration supplied
/// there; never recomputed for a different configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    template: String,
    fetcher: FetcherKind,
    deserializer: DeserializerKind,
}

impl EndpointDescriptor {
    pub(crate) fn new(
        template: String,
        fetcher: FetcherKind,
        deserializer: DeserializerKind,
    ) -> Self {
        Self {
            template,
            fetcher,
            deserializer,
        }
    }

    /// The URL template with `%s` positional placeholders
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Which fetcher services this endpoint
    pub fn fetcher(&self) -> FetcherKind {
        self.fetcher
    }

    /// Which deserializer decodes this endpoint's payload
    pub fn deserializer(&self) -> DeserializerKind {
        self.deserializer
    }

    /// Substitute the `%s` placeholders positionally.
    ///
    /// Fails when the number of arguments does not match the number of
    /// placeholders in the template.
    pub fn url(&self, args: &[&str]) -> Result<String, EndpointError> {
        let expected = self.template.matches("%s").count();
        if args.len() != expected {
            return Err(EndpointError::ParameterCount {
                expected,
                provided: args.len(),
            });
        }

        let mut url = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        for arg in args {
            match rest.split_once("%s") {
                Some((head, tail)) => {
                    url.push_str(head);
                    url.push_str(arg);
                    rest = tail;
                }
                None => {
                    return Err(EndpointError::ParameterCount {
                        expected,
                        provided: args.len(),
                    })
                }
            }
        }
        url.push_str(rest);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(template: &str) -> EndpointDescriptor {
        EndpointDescriptor::new(
            template.to_string(),
            FetcherKind::Standard,
            DeserializerKind::SportsApiXml,
        )
    }

    #[test]
    fn substitutes_placeholders_positionally() {
        let d = descriptor("/sports/%s/sport_events/%s/summary.xml");
        assert_eq!(
            d.url(&["en", "sr:match:12345"]).unwrap(),
            "/sports/en/sport_events/sr:match:12345/summary.xml"
        );
    }

    #[test]
    fn substitutes_query_placeholders() {
        let d = descriptor("/sports/%s/schedules/pre/schedule.xml?start=%s&limit=%s");
        assert_eq!(
            d.url(&["en", "0", "100"]).unwrap(),
            "/sports/en/schedules/pre/schedule.xml?start=0&limit=100"
        );
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let d = descriptor("/sports/%s/sports.xml");
        assert_eq!(
            d.url(&[]),
            Err(EndpointError::ParameterCount {
                expected: 1,
                provided: 0
            })
        );
        assert_eq!(
            d.url(&["en", "extra"]),
            Err(EndpointError::ParameterCount {
                expected: 1,
                provided: 2
            })
        );
    }

    #[test]
    fn template_without_placeholders_takes_no_args() {
        let d = descriptor("/descriptions/producers.xml");
        assert_eq!(d.url(&[]).unwrap(), "/descriptions/producers.xml");
    }
}
