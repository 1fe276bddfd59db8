#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// One fixed-width body line, 8 columns per value.
pub fn row(values: &[&str]) -> String {
    values.iter().map(|v| format!("{v:>8}")).collect()
}

pub fn sample_lines() -> Vec<String> {
    vec![
        "Geom Title=Sample geometry".into(),
        "Program Version=6.30".into(),
        "River Reach=Butte Creek     ,Upper           ".into(),
        "Type RM Length L Ch R = 1 ,5.39    ,100,110,120".into(),
        "Node Last Edited Time=Jan/01/2024 10:00:00".into(),
        "#Sta/Elev= 6 ".into(),
        row(&["0", "10", "50", "5", "100", "1", "150", "2", "200", "6"]),
        row(&["250", "11"]),
        "#Mann= 3 , 0 , 0".into(),
        row(&[".06", ".04", ".06"]),
        "Bank Sta=50,200".into(),
        "#Block Obstruct= 2 ,0".into(),
        row(&["100", "120", "5", "110", "130", "3"]),
        "Exp/Cntr=0.3,0.1".into(),
        "".into(),
        "Type RM Length L Ch R = 1 ,5.20    ,100,110,120".into(),
        "#Sta/Elev= 3 ".into(),
        row(&["0", "10", "50", "0", "100", "10"]),
        "".into(),
        "Type RM Length L Ch R = 1 ,4.80    ,100,110,120".into(),
        "#Sta/Elev= 3 ".into(),
        row(&["0", "10", "50", "0", "100", "10"]),
        "#Block Obstruct= 1 ,0".into(),
        row(&["50", "40", "2"]),
        "".into(),
        "Storage Area=Lake            ,1000,2000".into(),
        "#Elev/Volume= 3 ".into(),
        row(&["100", "0", "105", "500", "110", "2000"]),
    ]
}

pub fn sample_text() -> String {
    let mut s = sample_lines().join("\r\n");
    s.push_str("\r\n");
    s
}

pub fn write_sample(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, sample_text()).expect("write sample geometry");
    p
}

/// Deterministic xorshift so generated cases are stable across runs.
pub struct Rng(pub u64);

impl Rng {
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Integer in [lo, hi).
    pub fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo) as u64) as i64
    }
}
