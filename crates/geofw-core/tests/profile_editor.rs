use geofw_core::profile::{read_banks, read_profile, read_roughness, write_profile};
use geofw_core::{BankPair, FormatSpec, GeomError, GeometryDocument, Limits, Point, Profile, XsId};

mod common;
use common::sample_text;

fn xs539() -> XsId {
    XsId::new("Butte Creek", "Upper", "5.39")
}

fn doc() -> GeometryDocument {
    GeometryDocument::from_text(&sample_text())
}

#[test]
fn reads_profile_banks_and_roughness() {
    let d = doc();
    let p = read_profile(&d, &xs539(), &FormatSpec::LEGACY).unwrap();
    assert_eq!(p.len(), 6);
    assert_eq!(p.first().station, 0.0);
    assert_eq!(p.last().elevation, 11.0);
    assert_eq!(p.thalweg().station, 100.0);

    let b = read_banks(&d, &xs539()).unwrap().unwrap();
    assert_eq!((b.left, b.right), (50.0, 200.0));

    let n = read_roughness(&d, &xs539(), &FormatSpec::LEGACY).unwrap().unwrap();
    assert_eq!(n.len(), 3);

    let none = XsId::new("Butte Creek", "Upper", "5.20");
    assert!(read_banks(&d, &none).unwrap().is_none());
    assert!(read_roughness(&d, &none, &FormatSpec::LEGACY).unwrap().is_none());
}

#[test]
fn supplied_bank_stations_are_interpolated_in() {
    let d = doc();
    let p = Profile::from_pairs(&[(0.0, 10.0), (40.0, 4.0), (120.0, 0.0), (250.0, 10.0)]).unwrap();
    let bank = BankPair::new(30.0, 100.0).unwrap();

    let edit = write_profile(&d, &xs539(), &p, Some(bank), &FormatSpec::LEGACY, &Limits::CONSUMER)
        .unwrap();
    assert_eq!(edit.inserted_banks, vec![30.0, 100.0]);
    assert_eq!(edit.points_out, 6);
    assert!(!edit.simplified);

    let pts = edit.profile.points();
    assert_eq!((pts[1].station, pts[1].elevation), (30.0, 5.5));
    assert_eq!((pts[3].station, pts[3].elevation), (100.0, 1.0));

    // the file agrees with what was returned
    let again = read_profile(&edit.document, &xs539(), &FormatSpec::LEGACY).unwrap();
    assert_eq!(again, edit.profile);
    assert_eq!(
        read_banks(&edit.document, &xs539()).unwrap(),
        Some(bank)
    );
    assert!(edit.document.lines().iter().any(|l| l == "#Sta/Elev= 6 "));
    assert!(edit.document.lines().iter().any(|l| l == "Bank Sta=30,100"));
}

#[test]
fn existing_bank_line_is_honoured_when_none_supplied() {
    let d = doc();
    let p = Profile::from_pairs(&[(0.0, 10.0), (40.0, 4.0), (120.0, 0.0), (250.0, 10.0)]).unwrap();
    let edit = write_profile(&d, &xs539(), &p, None, &FormatSpec::LEGACY, &Limits::CONSUMER).unwrap();

    assert_eq!(edit.inserted_banks, vec![50.0, 200.0]);
    let at50 = edit.profile.points()[2];
    assert_eq!((at50.station, at50.elevation), (50.0, 3.5));
    let at200 = edit.profile.points()[4];
    assert_eq!((at200.station, at200.elevation), (200.0, 6.15));

    // bank line untouched, returned profile is exactly what the file holds
    assert!(edit.document.lines().iter().any(|l| l == "Bank Sta=50,200"));
    let back = read_profile(&edit.document, &xs539(), &FormatSpec::LEGACY).unwrap();
    assert_eq!(back, edit.profile);
}

#[test]
fn bank_elevation_comes_from_unrounded_profile() {
    let d = doc();
    // rounded first: 0.00 + 0.2 * 0.01 -> 0.00; unrounded: 0.006 -> 0.01
    let p = Profile::from_pairs(&[(0.0, 0.004), (10.0, 0.014), (250.0, 5.0)]).unwrap();
    let bank = BankPair::new(2.0, 10.0).unwrap();
    let edit = write_profile(&d, &xs539(), &p, Some(bank), &FormatSpec::LEGACY, &Limits::CONSUMER)
        .unwrap();

    assert_eq!(edit.inserted_banks, vec![2.0]);
    let pts = edit.profile.points();
    assert_eq!((pts[1].station, pts[1].elevation), (2.0, 0.01));
    assert_eq!((pts[2].station, pts[2].elevation), (10.0, 0.01));

    let back = read_profile(&edit.document, &xs539(), &FormatSpec::LEGACY).unwrap();
    assert_eq!(back, edit.profile);
}

#[test]
fn insert_point_keeps_station_order_and_refuses_duplicates() {
    let mut p = Profile::from_pairs(&[(0.0, 1.0), (10.0, 2.0)]).unwrap();
    assert!(p.insert_point(Point::new(4.0, 9.0)));
    assert!(!p.insert_point(Point::new(10.0, 0.0)));
    let stations: Vec<f64> = p.stations().collect();
    assert_eq!(stations, vec![0.0, 4.0, 10.0]);
    assert_eq!(p.points()[1].elevation, 9.0);
}

#[test]
fn bank_on_profile_end_needs_no_insert() {
    let d = doc();
    let p = Profile::from_pairs(&[(50.0, 5.0), (120.0, 0.0), (200.0, 6.0)]).unwrap();
    let edit = write_profile(&d, &xs539(), &p, None, &FormatSpec::LEGACY, &Limits::CONSUMER).unwrap();
    assert!(edit.inserted_banks.is_empty());
    assert_eq!(edit.profile.len(), 3);
}

#[test]
fn bank_outside_profile_is_rejected() {
    let d = doc();
    let p = Profile::from_pairs(&[(0.0, 10.0), (100.0, 0.0), (150.0, 10.0)]).unwrap();
    let err = write_profile(&d, &xs539(), &p, None, &FormatSpec::LEGACY, &Limits::CONSUMER)
        .unwrap_err();
    assert!(matches!(err, GeomError::Validation(_)));
    let msg = err.to_string();
    assert!(msg.contains("Butte Creek/Upper/5.39"), "{msg}");
    assert!(msg.contains("outside profile range"), "{msg}");
}

#[test]
fn duplicate_and_decreasing_stations_are_rejected() {
    let dup = Profile::from_pairs(&[(0.0, 1.0), (5.0, 2.0), (5.0, 3.0)]).unwrap_err();
    assert!(matches!(dup, GeomError::Validation(_)));
    assert!(dup.to_string().contains("duplicate station 5"));

    let back = Profile::from_pairs(&[(0.0, 1.0), (5.0, 2.0), (4.0, 3.0)]).unwrap_err();
    assert!(back.to_string().contains("below station"));

    assert!(Profile::from_pairs(&[(0.0, 1.0)]).is_err());
}

#[test]
fn stations_colliding_after_rounding_are_rejected() {
    let d = doc();
    let p = Profile::from_pairs(&[(0.0, 10.0), (100.001, 0.0), (100.004, 0.5), (250.0, 10.0)]).unwrap();
    let err = write_profile(&d, &xs539(), &p, None, &FormatSpec::LEGACY, &Limits::CONSUMER)
        .unwrap_err();
    assert!(matches!(err, GeomError::Validation(_)));
    assert!(err.to_string().contains("after rounding"));
}

#[test]
fn oversized_profile_is_simplified_below_ceiling() {
    let d = doc();
    let pairs: Vec<(f64, f64)> = (0..=600)
        .map(|i| {
            let s = i as f64 * 0.5;
            (s, 5.0 + (s / 7.0).sin() * 3.0 + (s / 1.3).cos() * 0.4)
        })
        .collect();
    let p = Profile::from_pairs(&pairs).unwrap();
    let bank = BankPair::new(50.25, 200.75).unwrap();

    let edit = write_profile(&d, &xs539(), &p, Some(bank), &FormatSpec::LEGACY, &Limits::CONSUMER)
        .unwrap();
    assert!(edit.simplified);
    assert!(edit.points_out <= 450);
    assert!(edit.profile.contains_station(50.25));
    assert!(edit.profile.contains_station(200.75));
    assert!(edit.profile.contains_station(0.0));
    assert!(edit.profile.contains_station(300.0));

    let back = read_profile(&edit.document, &xs539(), &FormatSpec::LEGACY).unwrap();
    assert_eq!(back.len(), edit.points_out);
}

#[test]
fn unrelated_lines_are_untouched() {
    let d = doc();
    let p = Profile::from_pairs(&[(0.0, 10.0), (50.0, 3.0), (200.0, 3.0), (250.0, 10.0)]).unwrap();
    let edit = write_profile(&d, &xs539(), &p, None, &FormatSpec::LEGACY, &Limits::CONSUMER).unwrap();

    let before = d.lines();
    let after = edit.document.lines();
    // 6 points -> 4 points: body shrinks from 2 lines to 1
    assert_eq!(after.len(), before.len() - 1);
    assert_eq!(&after[..5], &before[..5]);
    assert_eq!(&after[7..], &before[8..]);
}
