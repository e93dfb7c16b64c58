//! Static country reference data shared by every widget.
//!
//! Two reconciliations live here: the basemap identifies countries by a
//! numeric scheme while the dataset is keyed by ISO-alpha3, and the dataset's
//! embedded display names are superseded by the canonical French names below.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One entry of the canonical country list.
pub struct CountryRef {
    pub iso: &'static str,
    pub name: &'static str,
}

const fn c(iso: &'static str, name: &'static str) -> CountryRef {
    CountryRef { iso, name }
}

/// Canonical debtor-country list, French names, fixed enumeration order.
/// Search suggestions are produced in this order.
pub static COUNTRIES: &[CountryRef] = &[
    c("ZAF", "Afrique du Sud"),
    c("ALB", "Albanie"),
    c("DZA", "Algérie"),
    c("AGO", "Angola"),
    c("ATG", "Antigua-et-Barbuda"),
    c("SAU", "Arabie Saoudite"),
    c("ARG", "Argentine"),
    c("ARM", "Arménie"),
    c("AZE", "Azerbaïdjan"),
    c("BGD", "Bangladesh"),
    c("BEN", "Bénin"),
    c("BOL", "Bolivie"),
    c("BIH", "Bosnie-Herzégovine"),
    c("BWA", "Botswana"),
    c("BRA", "Brésil"),
    c("BFA", "Burkina Faso"),
    c("BDI", "Burundi"),
    c("KHM", "Cambodge"),
    c("CMR", "Cameroun"),
    c("CPV", "Cap-Vert"),
    c("CAF", "Centrafrique"),
    c("CHL", "Chili"),
    c("CHN", "Chine"),
    c("COL", "Colombie"),
    c("COM", "Comores"),
    c("COG", "Congo"),
    c("COD", "RD Congo"),
    c("PRK", "Corée du Nord"),
    c("KOR", "Corée du Sud"),
    c("CRI", "Costa Rica"),
    c("CIV", "Côte d'Ivoire"),
    c("HRV", "Croatie"),
    c("CUB", "Cuba"),
    c("DJI", "Djibouti"),
    c("DMA", "Dominique"),
    c("EGY", "Égypte"),
    c("SLV", "El Salvador"),
    c("ARE", "Émirats Arabes Unis"),
    c("ECU", "Équateur"),
    c("ERI", "Érythrée"),
    c("ETH", "Éthiopie"),
    c("GAB", "Gabon"),
    c("GMB", "Gambie"),
    c("GEO", "Géorgie"),
    c("GHA", "Ghana"),
    c("GRC", "Grèce"),
    c("GRD", "Grenade"),
    c("GTM", "Guatemala"),
    c("GIN", "Guinée"),
    c("GNB", "Guinée-Bissau"),
    c("GNQ", "Guinée Équatoriale"),
    c("GUY", "Guyana"),
    c("HTI", "Haïti"),
    c("HND", "Honduras"),
    c("IND", "Inde"),
    c("IDN", "Indonésie"),
    c("IRQ", "Irak"),
    c("IRN", "Iran"),
    c("JAM", "Jamaïque"),
    c("JOR", "Jordanie"),
    c("KAZ", "Kazakhstan"),
    c("KEN", "Kenya"),
    c("KGZ", "Kirghizistan"),
    c("KWT", "Koweït"),
    c("LAO", "Laos"),
    c("LSO", "Lesotho"),
    c("LBN", "Liban"),
    c("LBR", "Liberia"),
    c("LBY", "Libye"),
    c("MKD", "Macédoine du Nord"),
    c("MDG", "Madagascar"),
    c("MYS", "Malaisie"),
    c("MWI", "Malawi"),
    c("MDV", "Maldives"),
    c("MLI", "Mali"),
    c("MAR", "Maroc"),
    c("MUS", "Maurice"),
    c("MRT", "Mauritanie"),
    c("MEX", "Mexique"),
    c("MDA", "Moldavie"),
    c("MNG", "Mongolie"),
    c("MNE", "Monténégro"),
    c("MOZ", "Mozambique"),
    c("MMR", "Myanmar"),
    c("NAM", "Namibie"),
    c("NPL", "Népal"),
    c("NIC", "Nicaragua"),
    c("NER", "Niger"),
    c("NGA", "Nigeria"),
    c("OMN", "Oman"),
    c("UGA", "Ouganda"),
    c("UZB", "Ouzbékistan"),
    c("PAK", "Pakistan"),
    c("PAN", "Panama"),
    c("PNG", "Papouasie-Nouvelle-Guinée"),
    c("PRY", "Paraguay"),
    c("PER", "Pérou"),
    c("PHL", "Philippines"),
    c("POL", "Pologne"),
    c("DOM", "République Dominicaine"),
    c("ROU", "Roumanie"),
    c("RUS", "Russie"),
    c("RWA", "Rwanda"),
    c("LCA", "Sainte-Lucie"),
    c("VCT", "Saint-Vincent-et-les-Grenadines"),
    c("STP", "Sao Tomé-et-Principe"),
    c("SEN", "Sénégal"),
    c("SRB", "Serbie"),
    c("SYC", "Seychelles"),
    c("SLE", "Sierra Leone"),
    c("SVN", "Slovénie"),
    c("SOM", "Somalie"),
    c("SDN", "Soudan"),
    c("LKA", "Sri Lanka"),
    c("SUR", "Suriname"),
    c("SYR", "Syrie"),
    c("TJK", "Tadjikistan"),
    c("TZA", "Tanzanie"),
    c("TCD", "Tchad"),
    c("THA", "Thaïlande"),
    c("TGO", "Togo"),
    c("TTO", "Trinité-et-Tobago"),
    c("TUN", "Tunisie"),
    c("TKM", "Turkménistan"),
    c("TUR", "Turquie"),
    c("UKR", "Ukraine"),
    c("URY", "Uruguay"),
    c("VEN", "Venezuela"),
    c("VNM", "Vietnam"),
    c("YEM", "Yémen"),
    c("ZMB", "Zambie"),
    c("ZWE", "Zimbabwe"),
    c("XKX", "Kosovo"),
];

/// Numeric basemap identifier → ISO-alpha3. Covers every country the basemap
/// can emit, debtor or not, so map hovers resolve names for non-debtors too.
static NUMERIC_TO_ALPHA3: &[(&str, &str)] = &[
    ("004", "AFG"),
    ("008", "ALB"),
    ("012", "DZA"),
    ("024", "AGO"),
    ("028", "ATG"),
    ("032", "ARG"),
    ("051", "ARM"),
    ("031", "AZE"),
    ("050", "BGD"),
    ("052", "BRB"),
    ("056", "BEL"),
    ("084", "BLZ"),
    ("204", "BEN"),
    ("068", "BOL"),
    ("070", "BIH"),
    ("072", "BWA"),
    ("076", "BRA"),
    ("096", "BRN"),
    ("100", "BGR"),
    ("854", "BFA"),
    ("108", "BDI"),
    ("116", "KHM"),
    ("120", "CMR"),
    ("124", "CAN"),
    ("132", "CPV"),
    ("140", "CAF"),
    ("148", "TCD"),
    ("152", "CHL"),
    ("156", "CHN"),
    ("170", "COL"),
    ("174", "COM"),
    ("178", "COG"),
    ("180", "COD"),
    ("188", "CRI"),
    ("384", "CIV"),
    ("191", "HRV"),
    ("192", "CUB"),
    ("196", "CYP"),
    ("203", "CZE"),
    ("208", "DNK"),
    ("262", "DJI"),
    ("212", "DMA"),
    ("214", "DOM"),
    ("218", "ECU"),
    ("818", "EGY"),
    ("222", "SLV"),
    ("226", "GNQ"),
    ("232", "ERI"),
    ("233", "EST"),
    ("231", "ETH"),
    ("242", "FJI"),
    ("246", "FIN"),
    ("250", "FRA"),
    ("266", "GAB"),
    ("270", "GMB"),
    ("268", "GEO"),
    ("276", "DEU"),
    ("288", "GHA"),
    ("300", "GRC"),
    ("308", "GRD"),
    ("320", "GTM"),
    ("324", "GIN"),
    ("624", "GNB"),
    ("328", "GUY"),
    ("332", "HTI"),
    ("340", "HND"),
    ("348", "HUN"),
    ("352", "ISL"),
    ("356", "IND"),
    ("360", "IDN"),
    ("364", "IRN"),
    ("368", "IRQ"),
    ("372", "IRL"),
    ("376", "ISR"),
    ("380", "ITA"),
    ("388", "JAM"),
    ("392", "JPN"),
    ("400", "JOR"),
    ("398", "KAZ"),
    ("404", "KEN"),
    ("408", "PRK"),
    ("410", "KOR"),
    ("414", "KWT"),
    ("417", "KGZ"),
    ("418", "LAO"),
    ("428", "LVA"),
    ("422", "LBN"),
    ("426", "LSO"),
    ("430", "LBR"),
    ("434", "LBY"),
    ("440", "LTU"),
    ("442", "LUX"),
    ("807", "MKD"),
    ("450", "MDG"),
    ("454", "MWI"),
    ("458", "MYS"),
    ("462", "MDV"),
    ("466", "MLI"),
    ("470", "MLT"),
    ("478", "MRT"),
    ("480", "MUS"),
    ("484", "MEX"),
    ("498", "MDA"),
    ("496", "MNG"),
    ("499", "MNE"),
    ("504", "MAR"),
    ("508", "MOZ"),
    ("104", "MMR"),
    ("516", "NAM"),
    ("524", "NPL"),
    ("528", "NLD"),
    ("554", "NZL"),
    ("558", "NIC"),
    ("562", "NER"),
    ("566", "NGA"),
    ("578", "NOR"),
    ("512", "OMN"),
    ("586", "PAK"),
    ("591", "PAN"),
    ("598", "PNG"),
    ("600", "PRY"),
    ("604", "PER"),
    ("608", "PHL"),
    ("616", "POL"),
    ("620", "PRT"),
    ("634", "QAT"),
    ("642", "ROU"),
    ("643", "RUS"),
    ("646", "RWA"),
    ("882", "WSM"),
    ("678", "STP"),
    ("682", "SAU"),
    ("686", "SEN"),
    ("688", "SRB"),
    ("690", "SYC"),
    ("694", "SLE"),
    ("702", "SGP"),
    ("703", "SVK"),
    ("705", "SVN"),
    ("090", "SLB"),
    ("706", "SOM"),
    ("710", "ZAF"),
    ("728", "SSD"),
    ("724", "ESP"),
    ("144", "LKA"),
    ("662", "LCA"),
    ("670", "VCT"),
    ("729", "SDN"),
    ("740", "SUR"),
    ("748", "SWZ"),
    ("752", "SWE"),
    ("756", "CHE"),
    ("760", "SYR"),
    ("762", "TJK"),
    ("834", "TZA"),
    ("764", "THA"),
    ("768", "TGO"),
    ("780", "TTO"),
    ("788", "TUN"),
    ("792", "TUR"),
    ("795", "TKM"),
    ("800", "UGA"),
    ("804", "UKR"),
    ("784", "ARE"),
    ("826", "GBR"),
    ("840", "USA"),
    ("858", "URY"),
    ("860", "UZB"),
    ("862", "VEN"),
    ("704", "VNM"),
    ("887", "YEM"),
    ("894", "ZMB"),
    ("716", "ZWE"),
    ("-99", "XKX"),
];

static NUMERIC_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NUMERIC_TO_ALPHA3.iter().copied().collect());

static NAME_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COUNTRIES.iter().map(|c| (c.iso, c.name)).collect());

/// Reconcile a basemap numeric identifier to ISO-alpha3.
///
/// Unknown identifiers pass through unchanged: the subsequent dataset lookup
/// misses and the shape styles as "no data" instead of failing.
pub fn to_alpha3(numeric: &str) -> &str {
    NUMERIC_INDEX.get(numeric).copied().unwrap_or(numeric)
}

/// Canonical French display name for an ISO-alpha3 code.
pub fn display_name(iso: &str) -> Option<&'static str> {
    NAME_INDEX.get(iso).copied()
}
