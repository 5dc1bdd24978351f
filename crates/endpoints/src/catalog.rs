//! The statically enumerated endpoint registry

use std::collections::HashMap;

use config::FeedConfiguration;

use crate::descriptor::{DeserializerKind, EndpointDescriptor, FetcherKind};

/// Logical sports API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SportEventSummary,
    SportEventFixture,
    FixtureChangeFixture,
    FixtureChanges,
    ResultChanges,
    AllTournaments,
    AllSports,
    DateSchedule,
    TournamentSchedule,
    PlayerProfile,
    CompetitorProfile,
    SimpleTeamProfile,
    TournamentSeasons,
    MatchTimeline,
    SportCategories,
    Lotteries,
    DrawSummary,
    DrawFixture,
    LotterySchedule,
    ListSportEvents,
    SportTournaments,
    Producers,
    PeriodSummary,
}

impl Endpoint {
    /// Every logical endpoint, in catalog order
    pub const ALL: [Endpoint; 23] = [
        Endpoint::SportEventSummary,
        Endpoint::SportEventFixture,
        Endpoint::FixtureChangeFixture,
        Endpoint::FixtureChanges,
        Endpoint::ResultChanges,
        Endpoint::AllTournaments,
        Endpoint::AllSports,
        Endpoint::DateSchedule,
        Endpoint::TournamentSchedule,
        Endpoint::PlayerProfile,
        Endpoint::CompetitorProfile,
        Endpoint::SimpleTeamProfile,
        Endpoint::TournamentSeasons,
        Endpoint::MatchTimeline,
        Endpoint::SportCategories,
        Endpoint::Lotteries,
        Endpoint::DrawSummary,
        Endpoint::DrawFixture,
        Endpoint::LotterySchedule,
        Endpoint::ListSportEvents,
        Endpoint::SportTournaments,
        Endpoint::Producers,
        Endpoint::PeriodSummary,
    ];
}

/// Registry mapping each logical endpoint to its descriptor.
///
/// Built once per assembled configuration; every descriptor stays bound
/// to that configuration permanently. Safe for concurrent use once
/// constructed.
#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    descriptors: HashMap<Endpoint, EndpointDescriptor>,
}

impl EndpointCatalog {
    /// Build the full catalog for an assembled configuration
    pub fn new(cfg: &FeedConfiguration) -> Self {
        let descriptors = Endpoint::ALL
            .iter()
            .map(|endpoint| (*endpoint, descriptor_for(cfg, *endpoint)))
            .collect();

        tracing::debug!(
            replay_session = cfg.is_replay_session(),
            node_id = ?cfg.node_id,
            endpoints = Endpoint::ALL.len(),
            "Endpoint catalog constructed"
        );

        Self { descriptors }
    }

    /// The descriptor bound to a logical endpoint
    pub fn descriptor(&self, endpoint: Endpoint) -> Option<&EndpointDescriptor> {
        self.descriptors.get(&endpoint)
    }

    /// Iterate over every (endpoint, descriptor) pair
    pub fn iter(&self) -> impl Iterator<Item = (Endpoint, &EndpointDescriptor)> {
        self.descriptors.iter().map(|(e, d)| (*e, d))
    }
}

fn descriptor_for(cfg: &FeedConfiguration, endpoint: Endpoint) -> EndpointDescriptor {
    match endpoint {
        Endpoint::SportEventSummary => replay_aware(
            cfg,
            "/sports/%s/sport_events/%s/summary.xml",
            "/replay/sports/%s/sport_events/%s/summary.xml",
            FetcherKind::Fast,
        ),
        Endpoint::SportEventFixture => replay_aware(
            cfg,
            "/sports/%s/sport_events/%s/fixture.xml",
            "/replay/sports/%s/sport_events/%s/fixture.xml",
            FetcherKind::Standard,
        ),
        // Replay sessions serve only the plain fixture form.
        Endpoint::FixtureChangeFixture => replay_aware(
            cfg,
            "/sports/%s/sport_events/%s/fixture_change_fixture.xml",
            "/replay/sports/%s/sport_events/%s/fixture.xml",
            FetcherKind::Standard,
        ),
        Endpoint::MatchTimeline => replay_aware(
            cfg,
            "/sports/%s/sport_events/%s/timeline.xml",
            "/replay/sports/%s/sport_events/%s/timeline.xml",
            FetcherKind::Standard,
        ),
        Endpoint::FixtureChanges => {
            relative("/sports/%s/fixtures/changes.xml%s", FetcherKind::Standard)
        }
        Endpoint::ResultChanges => {
            relative("/sports/%s/results/changes.xml%s", FetcherKind::Standard)
        }
        Endpoint::AllTournaments => relative("/sports/%s/tournaments.xml", FetcherKind::Standard),
        Endpoint::AllSports => relative("/sports/%s/sports.xml", FetcherKind::Standard),
        Endpoint::DateSchedule => {
            relative("/sports/%s/schedules/%s/schedule.xml", FetcherKind::Standard)
        }
        Endpoint::TournamentSchedule => relative(
            "/sports/%s/tournaments/%s/schedule.xml",
            FetcherKind::Standard,
        ),
        Endpoint::PlayerProfile => {
            relative("/sports/%s/players/%s/profile.xml", FetcherKind::Fast)
        }
        Endpoint::CompetitorProfile => {
            relative("/sports/%s/competitors/%s/profile.xml", FetcherKind::Fast)
        }
        Endpoint::SimpleTeamProfile => {
            relative("/sports/%s/competitors/%s/profile.xml", FetcherKind::Fast)
        }
        Endpoint::TournamentSeasons => relative(
            "/sports/%s/tournaments/%s/seasons.xml",
            FetcherKind::Standard,
        ),
        Endpoint::SportCategories => {
            relative("/sports/%s/sports/%s/categories.xml", FetcherKind::Standard)
        }
        Endpoint::Lotteries => relative("/wns/sports/%s/lotteries.xml", FetcherKind::Standard),
        Endpoint::DrawSummary => relative(
            "/wns/sports/%s/sport_events/%s/summary.xml",
            FetcherKind::Standard,
        ),
        Endpoint::DrawFixture => relative(
            "/wns/sports/%s/sport_events/%s/fixture.xml",
            FetcherKind::Standard,
        ),
        Endpoint::LotterySchedule => relative(
            "/wns/sports/%s/lotteries/%s/schedule.xml",
            FetcherKind::Standard,
        ),
        Endpoint::ListSportEvents => relative(
            "/sports/%s/schedules/pre/schedule.xml?start=%s&limit=%s",
            FetcherKind::Standard,
        ),
        Endpoint::SportTournaments => relative(
            "/sports/%s/sports/%s/tournaments.xml",
            FetcherKind::Standard,
        ),
        Endpoint::Producers => relative("/descriptions/producers.xml", FetcherKind::Standard),
        Endpoint::PeriodSummary => relative(
            "/sports/%s/sport_events/%s/period_summary.xml%s",
            FetcherKind::Standard,
        ),
    }
}

fn relative(template: &str, fetcher: FetcherKind) -> EndpointDescriptor {
    EndpointDescriptor::new(
        template.to_string(),
        fetcher,
        DeserializerKind::SportsApiXml,
    )
}

fn replay_aware(
    cfg: &FeedConfiguration,
    normal: &str,
    replay_path: &str,
    fetcher: FetcherKind,
) -> EndpointDescriptor {
    let template = if cfg.is_replay_session() {
        format!("{}{}{}", base_url(cfg), replay_path, node_id_suffix(cfg))
    } else {
        normal.to_string()
    };

    EndpointDescriptor::new(template, fetcher, DeserializerKind::SportsApiXml)
}

fn base_url(cfg: &FeedConfiguration) -> String {
    let scheme = if cfg.use_api_ssl { "https" } else { "http" };
    format!("{}://{}/v1", scheme, cfg.api_host_and_port())
}

fn node_id_suffix(cfg: &FeedConfiguration) -> String {
    match cfg.node_id {
        Some(id) if id != 0 => format!("?node_id={}", id),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ConfigurationBuilder;

    fn default_configuration() -> FeedConfiguration {
        ConfigurationBuilder::new().build()
    }

    fn replay_configuration(node_id: Option<i32>) -> FeedConfiguration {
        let mut builder = ConfigurationBuilder::new();
        builder.set_replay_session(true);
        if let Some(id) = node_id {
            builder.set_node_id(id);
        }
        builder.build()
    }

    #[test]
    fn normal_mode_uses_relative_templates() {
        let catalog = EndpointCatalog::new(&default_configuration());

        assert_eq!(
            catalog
                .descriptor(Endpoint::SportEventSummary)
                .unwrap()
                .template(),
            "/sports/%s/sport_events/%s/summary.xml"
        );
        assert_eq!(
            catalog
                .descriptor(Endpoint::ListSportEvents)
                .unwrap()
                .template(),
            "/sports/%s/schedules/pre/schedule.xml?start=%s&limit=%s"
        );
    }

    #[test]
    fn replay_mode_rewrites_fixture_to_absolute_url_with_node_id() {
        let catalog = EndpointCatalog::new(&replay_configuration(Some(7)));

        assert_eq!(
            catalog
                .descriptor(Endpoint::SportEventFixture)
                .unwrap()
                .template(),
            "https://api.betradar.com/v1/replay/sports/%s/sport_events/%s/fixture.xml?node_id=7"
        );
    }

    #[test]
    fn node_id_suffix_is_absent_for_zero_or_unset() {
        for cfg in [replay_configuration(Some(0)), replay_configuration(None)] {
            let catalog = EndpointCatalog::new(&cfg);
            assert_eq!(
                catalog
                    .descriptor(Endpoint::SportEventFixture)
                    .unwrap()
                    .template(),
                "https://api.betradar.com/v1/replay/sports/%s/sport_events/%s/fixture.xml"
            );
        }
    }

    #[test]
    fn replay_scheme_follows_the_api_ssl_flag() {
        let mut builder = ConfigurationBuilder::new();
        builder.set_replay_session(true);
        builder.set_api_use_ssl(false);
        builder.set_api_port(8080).unwrap();
        let catalog = EndpointCatalog::new(&builder.build());

        assert_eq!(
            catalog
                .descriptor(Endpoint::SportEventSummary)
                .unwrap()
                .template(),
            "http://api.betradar.com:8080/v1/replay/sports/%s/sport_events/%s/summary.xml"
        );
    }

    #[test]
    fn fixture_change_fixture_replays_as_plain_fixture() {
        let catalog = EndpointCatalog::new(&replay_configuration(Some(7)));

        assert_eq!(
            catalog
                .descriptor(Endpoint::FixtureChangeFixture)
                .unwrap()
                .template(),
            catalog
                .descriptor(Endpoint::SportEventFixture)
                .unwrap()
                .template(),
        );
    }

    #[test]
    fn non_replay_endpoints_stay_relative_in_replay_mode() {
        let catalog = EndpointCatalog::new(&replay_configuration(Some(7)));

        assert_eq!(
            catalog.descriptor(Endpoint::AllSports).unwrap().template(),
            "/sports/%s/sports.xml"
        );
        assert_eq!(
            catalog.descriptor(Endpoint::Producers).unwrap().template(),
            "/descriptions/producers.xml"
        );
    }

    #[test]
    fn summary_and_profiles_use_the_fast_fetcher() {
        let catalog = EndpointCatalog::new(&default_configuration());

        for endpoint in [
            Endpoint::SportEventSummary,
            Endpoint::PlayerProfile,
            Endpoint::CompetitorProfile,
            Endpoint::SimpleTeamProfile,
        ] {
            assert_eq!(
                catalog.descriptor(endpoint).unwrap().fetcher(),
                FetcherKind::Fast
            );
        }
        assert_eq!(
            catalog
                .descriptor(Endpoint::SportEventFixture)
                .unwrap()
                .fetcher(),
            FetcherKind::Standard
        );
    }

    #[test]
    fn every_endpoint_has_a_descriptor() {
        let catalog = EndpointCatalog::new(&default_configuration());

        for endpoint in Endpoint::ALL {
            let descriptor = catalog.descriptor(endpoint).unwrap();
            assert_eq!(descriptor.deserializer(), DeserializerKind::SportsApiXml);
            assert!(!descriptor.template().is_empty());
        }
    }

    #[test]
    fn descriptors_resolve_full_urls() {
        let catalog = EndpointCatalog::new(&replay_configuration(Some(7)));

        let url = catalog
            .descriptor(Endpoint::SportEventSummary)
            .unwrap()
            .url(&["en", "sr:match:12345"])
            .unwrap();
        assert_eq!(
            url,
            "https://api.betradar.com/v1/replay/sports/en/sport_events/sr:match:12345/summary.xml?node_id=7"
        );
    }
}
