// crates/geofw-core/src/fixed/count.rs

use crate::error::{GeomError, Result};

pub const STA_ELEV: &str = "#Sta/Elev=";
pub const ELEV_VOLUME: &str = "#Elev/Volume=";
pub const MANNING: &str = "#Mann=";
pub const BLOCK_OBSTRUCT: &str = "#Block Obstruct=";

/// How many raw values one unit of a declared count stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountSemantics {
    Scalars,
    Pairs,
    Triplets,
}

impl CountSemantics {
    pub fn arity(self) -> usize {
        match self {
            CountSemantics::Scalars => 1,
            CountSemantics::Pairs => 2,
            CountSemantics::Triplets => 3,
        }
    }
}

const TABLE: &[(&str, CountSemantics)] = &[
    (STA_ELEV, CountSemantics::Pairs),
    (ELEV_VOLUME, CountSemantics::Pairs),
    (MANNING, CountSemantics::Scalars),
    (BLOCK_OBSTRUCT, CountSemantics::Triplets),
];

fn canonical(keyword: &str) -> &str {
    keyword.trim().trim_end_matches('=').trim_end()
}

pub fn semantics(keyword: &str) -> Result<CountSemantics> {
    let k = canonical(keyword);
    TABLE
        .iter()
        .find(|(name, _)| canonical(name) == k)
        .map(|&(_, s)| s)
        .ok_or_else(|| GeomError::Format(format!("count: unrecognized keyword {keyword:?}")))
}

/// Total number of raw values a header declaring `declared` stands for.
pub fn interpret(keyword: &str, declared: usize) -> Result<usize> {
    let s = semantics(keyword)?;
    declared
        .checked_mul(s.arity())
        .ok_or_else(|| GeomError::Format(format!("count: {declared} overflows for {keyword:?}")))
}

/// A counted header line: `#Block Obstruct= 2 ,0` is keyword `#Block Obstruct=`,
/// count 2, tail `,0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub keyword: String,
    pub count: usize,
    pub tail: String,
}

impl Header {
    pub fn new(keyword: &str, count: usize) -> Self {
        Header {
            keyword: keyword.to_string(),
            count,
            tail: String::new(),
        }
    }

    pub fn total_values(&self) -> Result<usize> {
        interpret(&self.keyword, self.count)
    }

    pub fn render(&self) -> String {
        format!("{} {}{}", self.keyword, self.count, self.tail)
    }
}

pub fn parse_header(line: &str) -> Result<Header> {
    let eq = line
        .find('=')
        .ok_or_else(|| GeomError::Format(format!("count: header has no '=': {line:?}")))?;
    let keyword = format!("{}=", line[..eq].trim_end());
    semantics(&keyword)?;

    let rest = &line[eq + 1..];
    let (num, tail) = match rest.find(',') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };
    let count = num.trim().parse::<usize>().map_err(|_| {
        GeomError::Format(format!("count: bad count {:?} in {keyword:?}", num.trim()))
    })?;

    // keep the spacing before the tail so a rewrite is byte-stable
    let pad = &num[num.trim_end().len()..];
    Ok(Header {
        keyword,
        count,
        tail: format!("{pad}{}", tail.trim_end()),
    })
}
