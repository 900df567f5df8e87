//! Faculty catalogue and selector expansion.
//!
//! The user picks one faculty by its catalogue code. Most codes match the
//! `fac.id` carried by authorships directly; a few units are recorded in the
//! export under other ids, so their selector expands to that id set.

use std::collections::BTreeSet;

/// Numeric faculty code as found in `fac.id`.
pub type FacultyId = u32;

/// Catalogue entry shown in `--faculty` help.
#[derive(Debug, Clone, Copy)]
pub struct Faculty {
    pub code: FacultyId,
    pub name: &'static str,
}

pub const FACULTIES: &[Faculty] = &[
    Faculty {
        code: 1,
        name: "МЕДИЧНИЙ ІНСТИТУТ (МІ)",
    },
    Faculty {
        code: 2,
        name: "ФАКУЛЬТЕТ ЕЛЕКТРОНІКИ ТА ІНФОРМАЦІЙНИХ ТЕХНОЛОГІЙ (ЕЛІТ)",
    },
    Faculty {
        code: 3,
        name: "ФАКУЛЬТЕТ ІНОЗЕМНОЇ ФІЛОЛОГІЇ ТА СОЦІАЛЬНИХ КОМУНІКАЦІЙ (ІФ СК)",
    },
    Faculty {
        code: 4,
        name: "ФАКУЛЬТЕТ ТЕХНІЧНИХ СИСТЕМ І ЕНЕРГОЕФЕКТИВНИХ ТЕХНОЛОГІЙ (ТеСЕТ)",
    },
    Faculty {
        code: 5,
        name: "НАВЧАЛЬНО-НАУКОВИЙ ІНСТИТУТ ФІНАНСІВ, ЕКОНОМІКИ ТА МЕНЕДЖМЕНТУ ІМЕНІ ОЛЕГА БАЛАЦЬКОГО (ННІ ФЕМ)",
    },
    Faculty {
        code: 6,
        name: "НАВЧАЛЬНО-НАУКОВИЙ ІНСТИТУТ ПРАВА (ННІП)",
    },
    Faculty {
        code: 7,
        name: "НАВЧАЛЬНО-НАУКОВИЙ ІНСТИТУТ БІЗНЕС ТЕХНОЛОГІЙ «УАБС» (ННІ БТ «УАБС»)",
    },
    Faculty {
        code: 8,
        name: "Шосткинський інститут СумДУ",
    },
    Faculty {
        code: 9,
        name: "Конотопський інститут СумДУ",
    },
    Faculty {
        code: 10,
        name: "Кафедра військової підготовки",
    },
];

/// Selector codes recorded in the export under different faculty ids.
const SELECTOR_EXPANSIONS: &[(FacultyId, &[FacultyId])] = &[
    // Конотопський інститут
    (9, &[200, 209]),
    // Кафедра військової підготовки
    (10, &[201]),
];

/// Set of faculty ids a publication must touch to be reported.
///
/// An empty filter matches every publication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyFilter {
    ids: BTreeSet<FacultyId>,
}

impl FacultyFilter {
    /// Filter that lets everything through.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = FacultyId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: FacultyId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = FacultyId> + '_ {
        self.ids.iter().copied()
    }
}

/// Expand the optional `--faculty` selector into the filter set.
pub fn expand_selector(selector: Option<FacultyId>) -> FacultyFilter {
    let Some(code) = selector else {
        return FacultyFilter::all();
    };

    match SELECTOR_EXPANSIONS.iter().find(|(sel, _)| *sel == code) {
        Some((_, ids)) => FacultyFilter::from_ids(ids.iter().copied()),
        None => FacultyFilter::from_ids([code]),
    }
}

/// Catalogue name for a selector code, if known.
pub fn faculty_name(code: FacultyId) -> Option<&'static str> {
    FACULTIES.iter().find(|f| f.code == code).map(|f| f.name)
}

/// Long help for `--faculty`, listing the catalogue.
pub fn selector_help() -> String {
    let mut help = String::from("Faculty ID:\n");
    for faculty in FACULTIES {
        help.push_str(&format!("{} -- {}\n", faculty.code, faculty.name));
    }
    help.push_str("All faculties will be processed by default");
    help
}
