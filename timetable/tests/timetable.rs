//! End-to-end use of the public API: build a small network, query it,
//! persist it and load it back.

use tempfile::tempdir;

use timetable::arrival::{format_wait_time, wait_time};
use timetable::coordinate::{distance_meters, parse_coordinate};
use timetable::domain::{DayCode, TimeValue, TransportKind, Vehicle, parse_days_string};
use timetable::registry::{Registry, RegistryConfig, RouteRequest};
use timetable::search::routes_between_stops;

struct Network {
    registry: Registry,
}

impl Network {
    fn new(config: RegistryConfig) -> Self {
        Self {
            registry: Registry::open(config).unwrap(),
        }
    }

    fn add(
        &mut self,
        vehicle: Vehicle,
        stops: &[(&str, &str)],
        times: &[u32],
        days: &str,
        start: TimeValue,
    ) {
        let ids: Vec<_> = stops
            .iter()
            .map(|(name, coordinate)| {
                self.registry
                    .find_or_create_stop(name, coordinate)
                    .unwrap()
            })
            .collect();
        self.registry
            .add_route(RouteRequest {
                vehicle,
                start: ids[0],
                end: ids[ids.len() - 1],
                intermediate: ids[1..ids.len() - 1].to_vec(),
                travel_times: times.to_vec(),
                days: parse_days_string(days),
                start_time: start,
            })
            .unwrap();
    }
}

fn build(config: RegistryConfig) -> Network {
    let mut network = Network::new(config);
    network.add(
        Vehicle::new(TransportKind::Bus, 7),
        &[
            ("Вокзал", "55.7765,37.6550"),
            ("Рынок", ""),
            ("Университет", "55.7030,37.5300"),
        ],
        &[12, 18],
        "пн, вт, ср, чт, пт",
        TimeValue::new(6, 30),
    );
    network.add(
        Vehicle::new(TransportKind::Tram, 3),
        &[("Университет", ""), ("Парк", ""), ("Вокзал", "")],
        &[9, 25],
        "Saturday; Sunday",
        TimeValue::new(23, 40),
    );
    network.add(
        Vehicle::new(TransportKind::Trolleybus, 15),
        &[("рынок", ""), ("Парк", "")],
        &[6],
        "понедельник суббота",
        TimeValue::new(7, 0),
    );
    network
}

#[test]
fn weekday_morning_query() {
    let network = build(RegistryConfig::in_memory());
    let registry = &network.registry;

    let found = registry.find_next_transport("РЫНОК", TimeValue::new(6, 30), DayCode::Mon);
    let summary: Vec<_> = found
        .iter()
        .map(|d| {
            (
                d.schedule.route().vehicle().short_name(),
                d.arrival,
                d.wait_minutes,
            )
        })
        .collect();
    assert_eq!(
        summary,
        [
            ("А7".to_string(), TimeValue::new(6, 42), 12),
            ("Тб15".to_string(), TimeValue::new(7, 0), 30),
        ]
    );
    assert_eq!(format_wait_time(found[1].wait_minutes), "30 мин");
}

#[test]
fn weekend_night_tram_wraps_midnight() {
    let network = build(RegistryConfig::in_memory());
    let registry = &network.registry;

    let tram = registry.schedule(3).unwrap();
    assert_eq!(
        tram.route().arrival_time_at_stop("вокзал").unwrap(),
        TimeValue::new(0, 14)
    );

    let found = registry.find_next_transport("Вокзал", TimeValue::new(23, 50), DayCode::Sun);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].wait_minutes, 24);
    assert_eq!(wait_time(TimeValue::new(23, 50), found[0].arrival), 24);

    // The weekday bus does not run on Sunday
    assert!(
        registry
            .find_next_transport("Рынок", TimeValue::new(6, 0), DayCode::Sun)
            .is_empty()
    );
}

#[test]
fn shared_stops_and_statistics() {
    let network = build(RegistryConfig::in_memory());
    let registry = &network.registry;

    // "рынок" reuses "Рынок"; "Вокзал" keeps its first coordinate
    assert_eq!(registry.all_stops().len(), 4);
    let station = registry.stops().find_by_name("вокзал").unwrap();
    assert_eq!(station.coordinate(), "55.7765,37.6550");

    let university = registry.stops().find_by_name("Университет").unwrap();
    let metres = distance_meters(
        &station.position().unwrap(),
        &university.position().unwrap(),
    );
    assert!((10_000.0..13_000.0).contains(&metres), "{metres}");
    let park = registry.stops().find_by_name("Парк").unwrap();
    assert!(parse_coordinate(park.coordinate()).is_none());

    let routes = registry.route_statistics();
    assert_eq!(routes.total_routes, 3);
    assert_eq!(
        (routes.bus_count, routes.trolleybus_count, routes.tram_count),
        (1, 1, 1)
    );

    let stops = registry.stop_statistics();
    assert_eq!(stops.active_stops, 4);
    assert_eq!(stops.stop_usage_count.get("рынок"), Some(&2));

    let daily = registry.daily_schedule_count();
    assert_eq!(daily[0], (DayCode::Mon, 2));
    assert_eq!(daily[5], (DayCode::Sat, 2));
    assert_eq!(daily[6], (DayCode::Sun, 1));

    let between: Vec<_> =
        routes_between_stops(registry.all_schedules(), "Университет", "Вокзал")
            .iter()
            .map(|s| s.route_number())
            .collect();
    assert_eq!(between, [3]);
}

#[test]
fn persisted_network_reloads_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("city").join("timetable.txt");
    let network = build(RegistryConfig::new(&path));

    let reloaded = Registry::open(RegistryConfig::new(&path)).unwrap();
    let original = &network.registry;

    assert_eq!(reloaded.all_route_numbers(), original.all_route_numbers());
    assert_eq!(reloaded.all_stops(), original.all_stops());
    for (got, want) in reloaded.all_schedules().iter().zip(original.all_schedules()) {
        assert_eq!(got, want);
    }
}

#[test]
fn removal_and_update_persist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("timetable.txt");
    let mut network = build(RegistryConfig::new(&path));
    let registry = &mut network.registry;

    registry.remove_route(15).unwrap();
    let start = registry.find_or_create_stop("Вокзал", "").unwrap();
    let end = registry.find_or_create_stop("Парк", "").unwrap();
    registry
        .update_route(
            3,
            RouteRequest {
                vehicle: Vehicle::new(TransportKind::Tram, 4),
                start,
                end,
                intermediate: vec![],
                travel_times: vec![20],
                days: vec!["вс".into()],
                start_time: TimeValue::new(10, 0),
            },
        )
        .unwrap();

    let reloaded = Registry::open(RegistryConfig::new(&path)).unwrap();
    assert_eq!(reloaded.all_route_numbers(), [7, 4]);
    assert_eq!(
        reloaded
            .schedule(4)
            .unwrap()
            .route()
            .arrival_time_at_stop("парк")
            .unwrap(),
        TimeValue::new(10, 20)
    );
}
