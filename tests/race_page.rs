use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use kartchrono_archive::errors::Error;
use kartchrono_archive::modules::kartchrono_api::parse_race_details;
use kartchrono_archive::modules::parsers::binary_laps::RawLap;

fn raw_lap(competitor_id: i32, lap_number: i32, sectors: [i32; 4], lap_time_ms: i32) -> RawLap {
    RawLap {
        competitor_id,
        lap_id: competitor_id * 100 + lap_number,
        lap_number,
        race_lap_number: lap_number,
        lap_pos: 1,
        sector1: sectors[0],
        sector2: sectors[1],
        sector3: sectors[2],
        lap_time_ms,
        timestamp_low: 1_700_000_000,
        timestamp_high: 0,
        lap_flags: 0,
        sector4: sectors[3],
    }
}

fn blob(laps: &[RawLap]) -> String {
    let bytes: Vec<u8> = laps.iter().flat_map(|lap| lap.to_bytes()).collect();
    STANDARD.encode(bytes)
}

fn race_page() -> String {
    let leader_laps = blob(&[
        raw_lap(-10001, 2, [15_100, 15_200, 14_900, 14_800], 60_000),
        raw_lap(-10001, 0, [0, 15_000, 15_000, 15_000], 0),
        raw_lap(-10001, 1, [15_000, 15_000, 15_000, 15_000], 900_000),
    ]);
    let second_laps = blob(&[
        raw_lap(-10002, 0, [4_000, 16_000, -1, 15_500], 36_000),
        raw_lap(-10002, 1, [15_400, 0, 15_600, 15_500], 61_500),
    ]);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<script type="text/javascript">
    var jsRace = {{"id": 42}};
    var jsCompetitors = {{
        "-10001": {{"num": "12", "name": "Anna", "pos": 1, "laps": 2, "theor_lap": 60000, "binary_laps": "{leader}", "extra": {{"k": [1, 2]}}}},
        "-10002": {{"num": 7, "name": "", "pos": 2, "laps": "1", "theor_lap": 61500, "binary_laps": "{second}"}}
    }};
    function show() {{ if (jsCompetitors) {{ return 1; }} }}
</script>
</head>
<body>
<table id="resultsTable">
    <tr class="headerRow"><th>Pos</th><th>Cart</th><th>Best lap</th></tr>
    <tr class="dataRow"><td id="pos">1</td><td id="num">12</td><td id="best_lap_time">1:00.000</td></tr>
    <tr class="dataRow"><td id="pos">2</td><td id="num">7</td><td id="best_lap_time">1:01.500</td></tr>
    <tr class="dataRow"><td id="pos">3</td><td id="num">31</td><td id="best_lap_time">1:05.000</td></tr>
</table>
</body>
</html>"#,
        leader = leader_laps,
        second = second_laps,
    )
}

#[test]
fn assembles_full_race() {
    let details = parse_race_details(&race_page()).unwrap();

    assert_eq!(details.carts.len(), 3);
    assert_eq!(details.competitors.len(), 2);

    let leader = &details.competitors[0];
    assert_eq!(leader.id, "-10001");
    assert_eq!(leader.display_name, "Anna");
    assert_eq!(leader.best_lap, "1:00.000");
    assert_eq!(leader.gap_to_leader.to_string(), "Leader");
    assert!(leader.is_leader());

    let second = details.competitor_by_cart("7").unwrap();
    assert_eq!(second.display_name, "Cart #7");
    assert_eq!(second.pos, 2);
    assert_eq!(second.laps, 1);
    assert_eq!(second.best_lap, "1:01.500");
    assert_eq!(second.gap_to_leader.to_string(), "+0:01.500");

    assert!(details.competitor_by_cart("31").is_none());
}

#[test]
fn decodes_laps_of_each_competitor() {
    let details = parse_race_details(&race_page()).unwrap();

    let leader_laps = &details.competitors[0].lap_times;
    let numbers: Vec<u32> = leader_laps.iter().map(|lap| lap.lap_number).collect();
    assert_eq!(numbers, vec![0, 1, 2]);
    assert_eq!(leader_laps[0].lap_time, None);
    assert_eq!(leader_laps[0].sector1, None);
    assert_eq!(leader_laps[0].sector2.as_deref(), Some("0:15.000"));
    // lap time above ten minutes is replaced by the sector sum
    assert_eq!(leader_laps[1].lap_time.as_deref(), Some("1:00.000"));
    assert_eq!(leader_laps[2].lap_time.as_deref(), Some("1:00.000"));
    assert_eq!(leader_laps[2].sector4.as_deref(), Some("0:14.800"));

    let second_laps = &details.competitors[1].lap_times;
    assert_eq!(second_laps[0].sector1, None);
    assert_eq!(second_laps[0].sector3, None);
    assert_eq!(second_laps[1].sector2, None);
    assert_eq!(second_laps[1].lap_time.as_deref(), Some("1:01.500"));
}

#[test]
fn race_serializes_to_json() {
    let details = parse_race_details(&race_page()).unwrap();
    let json = serde_json::to_value(&details).unwrap();

    assert_eq!(json["competitors"][0]["gap_to_leader"], "Leader");
    assert_eq!(json["competitors"][1]["gap_to_leader"], "+0:01.500");
    assert!(json["competitors"][0]["lap_times"][0]["sector1"].is_null());
}

#[test]
fn page_without_results_table_is_an_error() {
    let page = race_page().replace("resultsTable", "otherTable");
    assert!(matches!(parse_race_details(&page), Err(Error::TableNotFoundError { .. })));
}

#[test]
fn page_without_competitors_is_an_error() {
    let page = race_page().replace("var jsCompetitors =", "var jsDrivers =");
    assert!(matches!(parse_race_details(&page), Err(Error::ObjectNotFoundError { .. })));
}
