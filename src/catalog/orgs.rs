//! Source organizations and their display names

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Organizations harvested when no explicit list is configured
pub const DEFAULT_ORGANIZATIONS: [&str; 12] = [
    "Analytics-Learning-Programme",
    "Aneurin-Bevan-University-Health-Board",
    "Cardiff-Vale-University-Health-Board",
    "Cwm-Taf-Morgannwg-UHB",
    "DHCW-Digital-Health-and-Care-Wales",
    "GIGCymru",
    "HDUHB-Hywel-Dda-University-Health-Board",
    "National-Data-Resource-NDR",
    "NHS-Executive",
    "Powys-Teaching-Health-Board",
    "Swansea-Bay-University-Health-Board",
    "TBUHB-Cwm-Taf-Morgannwg-University-Health-Board",
];

lazy_static! {
    static ref DISPLAY_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        ("NHS-Executive", "NHS Executive"),
        ("DHCW-Digital-Health-and-Care-Wales", "Digital Health and Care Wales"),
        ("GIGCymru", "GitHub GIG Cymru"),
        ("NHS-Wales", "NHS Wales"),
        ("Betsi-Cadwaladr-UHB", "Betsi Cadwaladr UHB"),
        ("Cardiff-and-Vale-UHB", "Cardiff and Vale UHB"),
        ("Cardiff-Vale-University-Health-Board", "Cardiff and Vale UHB"),
        ("Cwm-Taf-Morgannwg-UHB", "Cwm Taf Morgannwg UHB"),
        ("TBUHB-Cwm-Taf-Morgannwg-University-Health-Board", "Cwm Taf Morgannwg UHB"),
        ("Hywel-Dda-UHB", "Hywel Dda UHB"),
        ("HDUHB-Hywel-Dda-University-Health-Board", "Hywel Dda UHB"),
        ("Swansea-Bay-UHB", "Swansea Bay UHB"),
        ("Swansea-Bay-University-Health-Board", "Swansea Bay UHB"),
        ("Aneurin-Bevan-UHB", "Aneurin Bevan UHB"),
        ("Aneurin-Bevan-University-Health-Board", "Aneurin Bevan UHB"),
        ("Powys-Teaching-HB", "Powys Teaching Health Board"),
        ("Powys-Teaching-Health-Board", "Powys Teaching Health Board"),
        ("National-Data-Resource-NDR", "National Data Resource"),
        ("Analytics-Learning-Programme", "Analytics Learning Programme"),
    ]);
}

/// Display name for an organization login. Unknown logins fall back to the
/// login with dashes replaced by spaces.
#[must_use]
pub fn organization_display_name(login: &str) -> String {
    DISPLAY_NAMES
        .get(login)
        .map_or_else(|| login.replace('-', " "), |name| (*name).to_string())
}
