use chrono::{DateTime, Utc};

use glance_application::aggregate::{
    error_counts, latency_ms, requests_per_minute, sparkline_points,
};
use glance_domain::{
    Dashboard, EnrichedApp, MetricsBundle, Notification, Organization, TimeWindow,
};

use crate::{Palette, format_release, sparkline};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    /// Reference point for release ages.
    pub now: DateTime<Utc>,
    /// Command named in the hints, e.g. `heroku` in `heroku addons`.
    pub command: String,
}

impl RenderOptions {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            color: true,
            now,
            command: "heroku".to_string(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    palette: Palette,
    window: TimeWindow,
    lines: Vec<String>,
}

impl<'a> Renderer<'a> {
    fn new(dashboard: &Dashboard, options: &'a RenderOptions) -> Self {
        Self {
            options,
            palette: Palette::new(options.color),
            window: dashboard.window,
            lines: Vec::new(),
        }
    }
}

/// Renders the whole dashboard for stdout. Pure apart from the options it is given.
pub fn render(dashboard: &Dashboard, options: &RenderOptions) -> String {
    let mut renderer = Renderer::new(dashboard, options);
    renderer.apps(dashboard);
    renderer.hints(dashboard);

    let mut out = renderer.lines.join("\n");
    out.push('\n');
    out
}

/// Warning meant for stderr: how to add apps when there are no favorites.
pub fn render_notice(dashboard: &Dashboard, options: &RenderOptions) -> Option<String> {
    if !dashboard.apps.is_empty() {
        return None;
    }
    let renderer = Renderer::new(dashboard, options);
    Some(format!(
        "{} Add apps to this dashboard by favoriting them with {}",
        renderer.palette.warning("▸"),
        renderer.command("apps:favorites:add")
    ))
}

/// `last 24 hours`, or minutes when the window is not whole hours.
fn window_label(minutes: i64) -> String {
    if minutes % 60 == 0 {
        format!("last {} hours", minutes / 60)
    } else {
        format!("last {minutes} minutes")
    }
}

impl Renderer<'_> {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn command(&self, args: &str) -> String {
        self.palette
            .command(format!("{} {}", self.options.command, args))
    }

    fn field(&self, label: &str, value: impl AsRef<str>) -> String {
        format!("  {} {}", self.palette.label(label), value.as_ref())
    }

    fn apps(&mut self, dashboard: &Dashboard) {
        for (app, metrics) in dashboard.rows() {
            self.push("");
            self.app(app, metrics);
        }
    }

    fn app(&mut self, app: &EnrichedApp, metrics: &MetricsBundle) {
        self.push(self.palette.app(app.name()));
        self.push(self.field("Owner:", app.app.owner.display_name()));
        if let Some(coupling) = &app.pipeline {
            self.push(self.field("Pipeline:", &coupling.pipeline.name));
        }

        let dynos: Vec<String> = app
            .quantities_by_size()
            .into_iter()
            .map(|(size, quantity)| format!("{} | {}", self.palette.bold(quantity), size))
            .collect();
        if !dynos.is_empty() {
            self.push(self.field("Dynos:", dynos.join(", ")));
        }

        if let Some(released_at) = app.app.released_at {
            let release = format_release(released_at, self.options.now);
            self.push(self.field("Last release:", release));
        }

        if let Some(line) = self.metrics_line(metrics) {
            self.push(line);
        }
        if let Some(line) = self.errors_line(metrics) {
            self.push(line);
        }
    }

    fn metrics_line(&self, metrics: &MetricsBundle) -> Option<String> {
        let latency = metrics
            .latency
            .as_ref()
            .and_then(latency_ms)
            .map(|ms| format!("{ms} ms"));
        let rate = metrics.router_volume.as_ref().and_then(|volume| {
            let minutes = self.window.minutes();
            let rpm = requests_per_minute(volume, minutes)?;
            let points = sparkline_points(volume, self.window.step);
            if points.is_empty() {
                Some(format!("{rpm} rpm"))
            } else {
                Some(format!(
                    "{rpm} rpm {} {} rpm",
                    self.palette.dim(sparkline(&points)),
                    window_label(minutes)
                ))
            }
        });

        let parts: Vec<String> = latency.into_iter().chain(rate).collect();
        if parts.is_empty() {
            return None;
        }
        Some(self.field("Metrics:", parts.join(" ")))
    }

    fn errors_line(&self, metrics: &MetricsBundle) -> Option<String> {
        let errors: Vec<String> = error_counts(metrics)
            .iter()
            .map(|error| self.palette.error(format!("{} {}", error.count, error.label)))
            .collect();
        if errors.is_empty() {
            return None;
        }
        let summary = format!(
            "{} (see details with {})",
            errors.join(self.palette.dim(", ").as_str()),
            self.command("apps:errors")
        );
        Some(self.field("Errors:", summary))
    }

    fn hints(&mut self, dashboard: &Dashboard) {
        self.push("");
        self.push(format!("See all add-ons with {}", self.command("addons")));
        if let Some(org) = Organization::sample(&dashboard.organizations) {
            let line = format!(
                "See all apps in {} with {}",
                self.palette.highlight(&org.name),
                self.command(&format!("apps --org {}", org.name))
            );
            self.push(line);
        }
        self.push(format!("See all apps with {}", self.command("apps --all")));

        let unread = Notification::unread_count(&dashboard.notifications);
        if unread > 0 {
            self.push("");
            let line = format!(
                "You have {} unread notifications. Read them with {}",
                self.palette.highlight(unread),
                self.command("notifications")
            );
            self.push(line);
        }

        self.push("");
        self.push(format!("See other CLI commands with {}", self.command("help")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use glance_domain::{
        App, ErrorSeries, Formation, LatencySeries, Owner, Pipeline, PipelineCoupling, Series,
        VolumeSeries,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn options() -> RenderOptions {
        RenderOptions::new(now()).with_color(false)
    }

    fn series(pairs: Vec<(&str, Vec<f64>)>) -> Series {
        Series {
            data: pairs
                .into_iter()
                .map(|(key, values)| (key.to_string(), values.into_iter().map(Some).collect()))
                .collect(),
        }
    }

    fn formation(process_type: &str, quantity: u32, size: &str) -> Formation {
        Formation {
            process_type: process_type.into(),
            quantity,
            size: size.into(),
        }
    }

    fn app(name: &str, email: &str, formation: Vec<Formation>) -> EnrichedApp {
        EnrichedApp {
            app: App {
                name: name.into(),
                owner: Owner { email: email.into() },
                released_at: None,
            },
            formation,
            pipeline: None,
        }
    }

    fn window(hours: i64, step: TimeDelta) -> TimeWindow {
        TimeWindow::trailing(now(), TimeDelta::hours(hours), step)
    }

    fn dashboard(apps: Vec<EnrichedApp>, metrics: Vec<MetricsBundle>) -> Dashboard {
        Dashboard {
            apps,
            metrics,
            window: window(24, TimeDelta::hours(1)),
            ..Dashboard::default()
        }
    }

    #[test]
    fn empty_dashboard_suggests_favoriting_on_the_side() {
        let text = render(&Dashboard::default(), &options());
        let notice = render_notice(&Dashboard::default(), &options()).expect("notice");

        assert_eq!(
            notice,
            "▸ Add apps to this dashboard by favoriting them with heroku apps:favorites:add"
        );
        assert!(!text.contains("apps:favorites:add"));
        assert!(text.starts_with("\nSee all add-ons with heroku addons"));
        assert!(text.contains("See all add-ons with heroku addons"));
        assert!(text.contains("See all apps with heroku apps --all"));
        assert!(!text.contains("See all apps in"));
        assert!(!text.contains("unread notifications"));
        assert!(text.ends_with("See other CLI commands with heroku help\n"));
    }

    #[test]
    fn app_block_lists_owner_pipeline_dynos_and_release() {
        let mut enriched = app(
            "shop",
            "team@herokumanager.com",
            vec![
                formation("web", 2, "standard-1x"),
                formation("worker", 1, "performance-m"),
                formation("clock", 1, "standard-1x"),
            ],
        );
        enriched.pipeline = Some(PipelineCoupling {
            pipeline: Pipeline {
                name: "storefront".into(),
            },
            stage: None,
        });
        enriched.app.released_at = Some(now() - TimeDelta::hours(3));

        let text = render(
            &dashboard(vec![enriched], vec![MetricsBundle::default()]),
            &options(),
        );

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "shop");
        assert_eq!(lines[2], "  Owner: team");
        assert_eq!(lines[3], "  Pipeline: storefront");
        assert_eq!(lines[4], "  Dynos: 3 | standard-1x, 1 | performance-m");
        assert_eq!(lines[5], "  Last release: 2026/05/01 09:00:00 +0000 (~ 3h ago)");
        assert_eq!(lines[6], "");
    }

    #[test]
    fn absent_metrics_are_omitted() {
        let text = render(
            &dashboard(
                vec![app("quiet", "dev@example.com", Vec::new())],
                vec![MetricsBundle::default()],
            ),
            &options(),
        );

        assert!(!text.contains("Dynos:"));
        assert!(!text.contains("Metrics:"));
        assert!(!text.contains("Errors:"));
        assert!(!text.contains("Last release:"));
    }

    #[test]
    fn zero_volume_is_shown_as_zero() {
        let metrics = MetricsBundle {
            router_volume: Some(VolumeSeries(series(vec![("200", vec![0.0; 24])]))),
            ..MetricsBundle::default()
        };
        let text = render(
            &dashboard(vec![app("idle", "dev@example.com", Vec::new())], vec![metrics]),
            &options(),
        );

        assert!(text.contains("  Metrics: 0 rpm ▁▁▁▁▁▁▁ last 24 hours rpm"));
    }

    #[test]
    fn metrics_line_combines_latency_and_rate() {
        let metrics = MetricsBundle {
            latency: Some(LatencySeries(series(vec![(
                "latency_p50",
                vec![100.0, 200.0, 300.0],
            )]))),
            router_volume: Some(VolumeSeries(series(vec![("200", vec![60.0; 24])]))),
            ..MetricsBundle::default()
        };
        let text = render(
            &dashboard(vec![app("busy", "dev@example.com", Vec::new())], vec![metrics]),
            &options(),
        );

        assert!(text.contains("  Metrics: 200 ms 1 rpm ▁▁▁▁▁▁▁ last 24 hours rpm"));
    }

    #[test]
    fn rate_and_label_follow_the_collection_window() {
        let metrics = MetricsBundle {
            router_volume: Some(VolumeSeries(series(vec![("200", vec![60.0; 6])]))),
            ..MetricsBundle::default()
        };
        let mut board = dashboard(vec![app("short", "dev@example.com", Vec::new())], vec![metrics]);
        board.window = window(6, TimeDelta::hours(1));

        let text = render(&board, &RenderOptions::new(now()).with_color(false));

        assert!(text.contains("  Metrics: 1 rpm ▁ last 6 hours rpm"));
        assert!(render_notice(&board, &options()).is_none());
    }

    #[test]
    fn partial_hour_window_is_labelled_in_minutes() {
        let metrics = MetricsBundle {
            router_volume: Some(VolumeSeries(series(vec![("200", vec![40.0; 10])]))),
            ..MetricsBundle::default()
        };
        let mut board = dashboard(vec![app("tiny", "dev@example.com", Vec::new())], vec![metrics]);
        board.window = TimeWindow::trailing(now(), TimeDelta::minutes(200), TimeDelta::minutes(20));

        let text = render(&board, &options());

        assert!(text.contains("  Metrics: 2 rpm ▁ last 200 minutes rpm"));
    }

    #[test]
    fn errors_list_router_first_and_point_to_details() {
        let metrics = MetricsBundle {
            process_errors: vec![
                Some(ErrorSeries(series(vec![("R14", vec![1.0, 1.0])]))),
                None,
            ],
            router_errors: Some(ErrorSeries(series(vec![
                ("H12", vec![2.0, 1.0]),
                ("H13", vec![0.0]),
            ]))),
            ..MetricsBundle::default()
        };
        let text = render(
            &dashboard(
                vec![app("flaky", "dev@example.com", vec![formation("web", 1, "basic")])],
                vec![metrics],
            ),
            &options(),
        );

        assert!(text.contains(
            "  Errors: 3 H12, 0 H13, 2 R14 (see details with heroku apps:errors)"
        ));
    }

    #[test]
    fn hints_name_the_sample_org_and_unread_count() {
        let board = Dashboard {
            organizations: vec![
                Organization {
                    name: "newer".into(),
                    role: Some("admin".into()),
                    created_at: Some(now() - TimeDelta::days(1)),
                },
                Organization {
                    name: "older".into(),
                    role: Some("member".into()),
                    created_at: Some(now() - TimeDelta::days(30)),
                },
                Organization {
                    name: "oldest".into(),
                    role: Some("collaborator".into()),
                    created_at: Some(now() - TimeDelta::days(300)),
                },
            ],
            notifications: vec![
                Notification {
                    id: "1".into(),
                    title: None,
                    read: false,
                },
                Notification {
                    id: "2".into(),
                    title: None,
                    read: false,
                },
                Notification {
                    id: "3".into(),
                    title: None,
                    read: true,
                },
            ],
            ..Dashboard::default()
        };

        let text = render(&board, &options().with_command("glance"));

        assert!(text.contains("See all apps in older with glance apps --org older"));
        assert!(text.contains(
            "You have 2 unread notifications. Read them with glance notifications"
        ));
    }

    #[test]
    fn color_option_controls_escapes() {
        let plain = render(&Dashboard::default(), &options());
        let colored = render(&Dashboard::default(), &options().with_color(true));

        assert!(!plain.contains('\u{1b}'));
        assert!(colored.contains('\u{1b}'));
    }
}
