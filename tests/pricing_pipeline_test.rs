use chrono::{DateTime, Duration, TimeZone, Utc};
use epex_monitor::entsoe::PublicationDocument;
use epex_monitor::pricing::{FallbackReason, TimeSlot, normalize, resolve};

fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, d, h, m, 0).unwrap()
}

fn period(start: &str, resolution: &str, prices: &[f64]) -> String {
    let points: String = prices
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "<Point><position>{}</position><price.amount>{}</price.amount></Point>",
                i + 1,
                p
            )
        })
        .collect();
    format!(
        "<Period><timeInterval><start>{}</start><end>ignored</end></timeInterval>\
         <resolution>{}</resolution>{}</Period>",
        start, resolution, points
    )
}

fn document(series: &[String]) -> PublicationDocument {
    let body: String = series
        .iter()
        .map(|p| format!("<TimeSeries><mRID>1</mRID>{}</TimeSeries>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <Publication_MarketDocument xmlns=\"urn:iec62325.351:tc57wg16:451-3:publicationdocument:7:3\">\
         <mRID>doc</mRID>{}</Publication_MarketDocument>",
        body
    );
    PublicationDocument::from_xml(&xml).unwrap()
}

fn fallback(now: DateTime<Utc>) -> TimeSlot {
    TimeSlot::fallback(now)
}

#[test]
fn hourly_period_resolves_inside_second_slot() {
    let doc = document(&[period("2025-01-06T00:00Z", "PT60M", &[50.0, 60.0, 70.0])]);
    let slots = normalize(&doc);
    assert_eq!(slots.len(), 3);

    let now = at(6, 1, 30);
    let resolved = resolve(&slots, now, fallback(now));
    assert!(!resolved.is_fallback());
    assert_eq!(resolved.slot.start, at(6, 1, 0));
    assert_eq!(resolved.slot.display_price(), 6.0);
}

#[test]
fn quarter_hour_period_spaces_slots_by_fifteen_minutes() {
    let doc = document(&[period("2025-01-06T00:00Z", "PT15M", &[10.0, 20.0, 30.0, 40.0])]);
    let slots = normalize(&doc);
    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![at(6, 0, 0), at(6, 0, 15), at(6, 0, 30), at(6, 0, 45)]
    );

    let now = at(6, 0, 20);
    let resolved = resolve(&slots, now, fallback(now));
    assert_eq!(resolved.slot.price, 20.0);
}

#[test]
fn before_first_slot_falls_back() {
    let doc = document(&[period("2025-01-06T00:00Z", "PT60M", &[50.0, 60.0, 70.0])]);
    let slots = normalize(&doc);
    let now = at(5, 23, 0);
    let resolved = resolve(&slots, now, fallback(now));
    assert_eq!(resolved.slot.display_price(), 100.0);
    assert!(matches!(
        resolved.fallback_reason(),
        Some(FallbackReason::AllFuture { .. })
    ));
}

#[test]
fn last_slot_is_valid_for_one_hour_only() {
    let doc = document(&[period("2025-01-06T00:00Z", "PT60M", &[50.0, 60.0, 70.0])]);
    let slots = normalize(&doc);

    let inside = at(6, 2, 59);
    assert_eq!(resolve(&slots, inside, fallback(inside)).slot.price, 70.0);

    let after = at(6, 4, 0);
    let resolved = resolve(&slots, after, fallback(after));
    assert!(matches!(
        resolved.fallback_reason(),
        Some(FallbackReason::AllPast { .. })
    ));
    assert_eq!(resolved.slot.display_price(), 100.0);
}

#[test]
fn empty_document_has_no_data() {
    let doc = document(&[]);
    let slots = normalize(&doc);
    assert!(slots.is_empty());
    let now = at(6, 12, 0);
    let resolved = resolve(&slots, now, fallback(now));
    assert!(matches!(resolved.fallback_reason(), Some(FallbackReason::NoData)));
}

#[test]
fn multiple_series_are_merged_in_time_order() {
    // Second day delivered first
    let doc = document(&[
        period("2025-01-06T23:00Z", "PT60M", &[80.0, 90.0]),
        period("2025-01-05T23:00Z", "PT60M", &[40.0, 45.0]),
    ]);
    let slots = normalize(&doc);
    assert_eq!(slots.len(), 4);
    assert!(slots.windows(2).all(|w| w[0].start <= w[1].start));
    assert_eq!(slots[0].start, at(5, 23, 0));
    assert_eq!(slots[3].start, at(7, 0, 0));

    let now = at(6, 23, 10);
    assert_eq!(resolve(&slots, now, fallback(now)).slot.price, 80.0);
}

#[test]
fn positions_are_offsets_from_period_start() {
    let xml = "<Publication_MarketDocument><TimeSeries><Period>\
               <timeInterval><start>2025-01-06T00:00Z</start></timeInterval>\
               <resolution>PT60M</resolution>\
               <Point><position>3</position><price.amount>33.3</price.amount></Point>\
               <Point><position>1</position><price.amount>11.1</price.amount></Point>\
               </Period></TimeSeries></Publication_MarketDocument>";
    let slots = normalize(&PublicationDocument::from_xml(xml).unwrap());
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start, at(6, 0, 0));
    assert_eq!(slots[0].price, 11.1);
    assert_eq!(slots[1].start, at(6, 0, 0) + Duration::hours(2));
}
