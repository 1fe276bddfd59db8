use geofw_core::fixed::codec::encode;
use geofw_core::fixed::count::{interpret, parse_header, semantics, CountSemantics, Header};
use geofw_core::GeomError;

#[test]
fn pair_keyword_doubles() {
    assert_eq!(interpret("#Sta/Elev=", 40).unwrap(), 80);
    assert_eq!(interpret("#Sta/Elev", 40).unwrap(), 80);
    assert_eq!(interpret("#Elev/Volume=", 7).unwrap(), 14);
}

#[test]
fn scalar_keyword_is_literal() {
    assert_eq!(interpret("#Mann=", 3).unwrap(), 3);
}

#[test]
fn obstruction_keyword_is_triplets() {
    assert_eq!(semantics("#Block Obstruct=").unwrap(), CountSemantics::Triplets);
    assert_eq!(interpret("#Block Obstruct=", 2).unwrap(), 6);
}

#[test]
fn unknown_keyword_is_format_error() {
    let err = interpret("#Levee=", 3).unwrap_err();
    assert!(matches!(err, GeomError::Format(_)));
}

#[test]
fn sta_elev_40_is_eight_lines_of_ten() {
    let h = parse_header("#Sta/Elev= 40").unwrap();
    assert_eq!(h.keyword, "#Sta/Elev=");
    assert_eq!(h.count, 40);
    let total = h.total_values().unwrap();
    assert_eq!(total, 80);

    let v: Vec<f64> = (0..total).map(|i| i as f64).collect();
    let lines = encode(&v, 8, 10, 2);
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|l| l.len() == 80));
}

#[test]
fn header_tail_survives_rewrite() {
    let h = parse_header("#Block Obstruct= 2 ,0").unwrap();
    assert_eq!(h.count, 2);
    assert_eq!(h.render(), "#Block Obstruct= 2 ,0");

    let mut h = parse_header("#Mann= 3 , 0 , 0").unwrap();
    h.count = 4;
    assert_eq!(h.render(), "#Mann= 4 , 0 , 0");

    assert_eq!(Header::new("#Sta/Elev=", 12).render(), "#Sta/Elev= 12");
}

#[test]
fn bad_count_is_format_error() {
    assert!(matches!(
        parse_header("#Sta/Elev= many").unwrap_err(),
        GeomError::Format(_)
    ));
    assert!(matches!(
        parse_header("#Sta/Elev 12").unwrap_err(),
        GeomError::Format(_)
    ));
}
