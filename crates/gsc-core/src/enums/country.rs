//! ISO 3166-1 alpha-3 country codes
//!
//! Country filters are sent with the alpha-3 code; the symbolic name is
//! accepted wherever a country is parsed from text.

use super::code_enum;

code_enum! {
    /// Country a search originated from
    pub enum Country: "country" {
        Afghanistan => ("AFGHANISTAN", "AFG"),
        AlandIslands => ("ALAND_ISLANDS", "ALA"),
        Albania => ("ALBANIA", "ALB"),
        Algeria => ("ALGERIA", "DZA"),
        AmericanSamoa => ("AMERICAN_SAMOA", "ASM"),
        Andorra => ("ANDORRA", "AND"),
        Angola => ("ANGOLA", "AGO"),
        Anguilla => ("ANGUILLA", "AIA"),
        Antarctica => ("ANTARCTICA", "ATA"),
        AntiguaAndBarbuda => ("ANTIGUA_AND_BARBUDA", "ATG"),
        Argentina => ("ARGENTINA", "ARG"),
        Armenia => ("ARMENIA", "ARM"),
        Aruba => ("ARUBA", "ABW"),
        Australia => ("AUSTRALIA", "AUS"),
        Austria => ("AUSTRIA", "AUT"),
        Azerbaijan => ("AZERBAIJAN", "AZE"),
        Bahamas => ("BAHAMAS", "BHS"),
        Bahrain => ("BAHRAIN", "BHR"),
        Bangladesh => ("BANGLADESH", "BGD"),
        Barbados => ("BARBADOS", "BRB"),
        Belarus => ("BELARUS", "BLR"),
        Belgium => ("BELGIUM", "BEL"),
        Belize => ("BELIZE", "BLZ"),
        Benin => ("BENIN", "BEN"),
        Bermuda => ("BERMUDA", "BMU"),
        Bhutan => ("BHUTAN", "BTN"),
        Bolivia => ("BOLIVIA", "BOL"),
        BonaireSintEustatiusAndSaba => ("BONAIRE_SINT_EUSTATIUS_AND_SABA", "BES"),
        BosniaAndHerzegovina => ("BOSNIA_AND_HERZEGOVINA", "BIH"),
        Botswana => ("BOTSWANA", "BWA"),
        BouvetIsland => ("BOUVET_ISLAND", "BVT"),
        Brazil => ("BRAZIL", "BRA"),
        BritishIndianOceanTerritory => ("BRITISH_INDIAN_OCEAN_TERRITORY", "IOT"),
        BruneiDarussalam => ("BRUNEI_DARUSSALAM", "BRN"),
        Bulgaria => ("BULGARIA", "BGR"),
        BurkinaFaso => ("BURKINA_FASO", "BFA"),
        Burundi => ("BURUNDI", "BDI"),
        CaboVerde => ("CABO_VERDE", "CPV"),
        Cambodia => ("CAMBODIA", "KHM"),
        Cameroon => ("CAMEROON", "CMR"),
        Canada => ("CANADA", "CAN"),
        CaymanIslands => ("CAYMAN_ISLANDS", "CYM"),
        CentralAfricanRepublic => ("CENTRAL_AFRICAN_REPUBLIC", "CAF"),
        Chad => ("CHAD", "TCD"),
        Chile => ("CHILE", "CHL"),
        China => ("CHINA", "CHN"),
        ChristmasIsland => ("CHRISTMAS_ISLAND", "CXR"),
        CocosKeelingIslands => ("COCOS_KEELING_ISLANDS", "CCK"),
        Colombia => ("COLOMBIA", "COL"),
        Comoros => ("COMOROS", "COM"),
        CongoDemocraticRepublic => ("CONGO_DEMOCRATIC_REPUBLIC", "COD"),
        Congo => ("CONGO", "COG"),
        CookIslands => ("COOK_ISLANDS", "COK"),
        CostaRica => ("COSTA_RICA", "CRI"),
        Croatia => ("CROATIA", "HRV"),
        Cuba => ("CUBA", "CUB"),
        Curacao => ("CURACAO", "CUW"),
        Cyprus => ("CYPRUS", "CYP"),
        Czechia => ("CZECHIA", "CZE"),
        Denmark => ("DENMARK", "DNK"),
        Djibouti => ("DJIBOUTI", "DJI"),
        Dominica => ("DOMINICA", "DMA"),
        DominicanRepublic => ("DOMINICAN_REPUBLIC", "DOM"),
        Ecuador => ("ECUADOR", "ECU"),
        Egypt => ("EGYPT", "EGY"),
        ElSalvador => ("EL_SALVADOR", "SLV"),
        EquatorialGuinea => ("EQUATORIAL_GUINEA", "GNQ"),
        Eritrea => ("ERITREA", "ERI"),
        Estonia => ("ESTONIA", "EST"),
        Eswatini => ("ESWATINI", "SWZ"),
        Ethiopia => ("ETHIOPIA", "ETH"),
        FalklandIslands => ("FALKLAND_ISLANDS", "FLK"),
        FaroeIslands => ("FAROE_ISLANDS", "FRO"),
        Fiji => ("FIJI", "FJI"),
        Finland => ("FINLAND", "FIN"),
        France => ("FRANCE", "FRA"),
        FrenchGuiana => ("FRENCH_GUIANA", "GUF"),
        FrenchPolynesia => ("FRENCH_POLYNESIA", "PYF"),
        FrenchSouthernTerritories => ("FRENCH_SOUTHERN_TERRITORIES", "ATF"),
        Gabon => ("GABON", "GAB"),
        Gambia => ("GAMBIA", "GMB"),
        Georgia => ("GEORGIA", "GEO"),
        Germany => ("GERMANY", "DEU"),
        Ghana => ("GHANA", "GHA"),
        Gibraltar => ("GIBRALTAR", "GIB"),
        Greece => ("GREECE", "GRC"),
        Greenland => ("GREENLAND", "GRL"),
        Grenada => ("GRENADA", "GRD"),
        Guadeloupe => ("GUADELOUPE", "GLP"),
        Guam => ("GUAM", "GUM"),
        Guatemala => ("GUATEMALA", "GTM"),
        Guernsey => ("GUERNSEY", "GGY"),
        Guinea => ("GUINEA", "GIN"),
        GuineaBissau => ("GUINEA_BISSAU", "GNB"),
        Guyana => ("GUYANA", "GUY"),
        Haiti => ("HAITI", "HTI"),
        HeardIslandAndMcdonaldIslands => ("HEARD_ISLAND_AND_MCDONALD_ISLANDS", "HMD"),
        HolySee => ("HOLY_SEE", "VAT"),
        Honduras => ("HONDURAS", "HND"),
        HongKong => ("HONG_KONG", "HKG"),
        Hungary => ("HUNGARY", "HUN"),
        Iceland => ("ICELAND", "ISL"),
        India => ("INDIA", "IND"),
        Indonesia => ("INDONESIA", "IDN"),
        Iran => ("IRAN", "IRN"),
        Iraq => ("IRAQ", "IRQ"),
        Ireland => ("IRELAND", "IRL"),
        IsleOfMan => ("ISLE_OF_MAN", "IMN"),
        Israel => ("ISRAEL", "ISR"),
        Italy => ("ITALY", "ITA"),
        IvoryCoast => ("IVORY_COAST", "CIV"),
        Jamaica => ("JAMAICA", "JAM"),
        Japan => ("JAPAN", "JPN"),
        Jersey => ("JERSEY", "JEY"),
        Jordan => ("JORDAN", "JOR"),
        Kazakhstan => ("KAZAKHSTAN", "KAZ"),
        Kenya => ("KENYA", "KEN"),
        Kiribati => ("KIRIBATI", "KIR"),
        KoreaDemocraticPeopleRepublic => ("KOREA_DEMOCRATIC_PEOPLE_REPUBLIC", "PRK"),
        KoreaRepublicOf => ("KOREA_REPUBLIC_OF", "KOR"),
        Kuwait => ("KUWAIT", "KWT"),
        Kyrgyzstan => ("KYRGYZSTAN", "KGZ"),
        LaoRepublic => ("LAO_REPUBLIC", "LAO"),
        Latvia => ("LATVIA", "LVA"),
        Lebanon => ("LEBANON", "LBN"),
        Lesotho => ("LESOTHO", "LSO"),
        Liberia => ("LIBERIA", "LBR"),
        Libya => ("LIBYA", "LBY"),
        Liechtenstein => ("LIECHTENSTEIN", "LIE"),
        Lithuania => ("LITHUANIA", "LTU"),
        Luxembourg => ("LUXEMBOURG", "LUX"),
        Macao => ("MACAO", "MAC"),
        Madagascar => ("MADAGASCAR", "MDG"),
        Malawi => ("MALAWI", "MWI"),
        Malaysia => ("MALAYSIA", "MYS"),
        Maldives => ("MALDIVES", "MDV"),
        Mali => ("MALI", "MLI"),
        Malta => ("MALTA", "MLT"),
        MarshallIslands => ("MARSHALL_ISLANDS", "MHL"),
        Martinique => ("MARTINIQUE", "MTQ"),
        Mauritania => ("MAURITANIA", "MRT"),
        Mauritius => ("MAURITIUS", "MUS"),
        Mayotte => ("MAYOTTE", "MYT"),
        Mexico => ("MEXICO", "MEX"),
        Micronesia => ("MICRONESIA", "FSM"),
        Moldova => ("MOLDOVA", "MDA"),
        Monaco => ("MONACO", "MCO"),
        Mongolia => ("MONGOLIA", "MNG"),
        Montenegro => ("MONTENEGRO", "MNE"),
        Montserrat => ("MONTSERRAT", "MSR"),
        Morocco => ("MOROCCO", "MAR"),
        Mozambique => ("MOZAMBIQUE", "MOZ"),
        Myanmar => ("MYANMAR", "MMR"),
        Namibia => ("NAMIBIA", "NAM"),
        Nauru => ("NAURU", "NRU"),
        Nepal => ("NEPAL", "NPL"),
        Netherlands => ("NETHERLANDS", "NLD"),
        NewCaledonia => ("NEW_CALEDONIA", "NCL"),
        NewZealand => ("NEW_ZEALAND", "NZL"),
        Nicaragua => ("NICARAGUA", "NIC"),
        Niger => ("NIGER", "NER"),
        Nigeria => ("NIGERIA", "NGA"),
        Niue => ("NIUE", "NIU"),
        NorfolkIsland => ("NORFOLK_ISLAND", "NFK"),
        NorthernMarianaIslands => ("NORTHERN_MARIANA_ISLANDS", "MNP"),
        Norway => ("NORWAY", "NOR"),
        Oman => ("OMAN", "OMN"),
        Pakistan => ("PAKISTAN", "PAK"),
        Palau => ("PALAU", "PLW"),
        Palestine => ("PALESTINE", "PSE"),
        Panama => ("PANAMA", "PAN"),
        PapuaNewGuinea => ("PAPUA_NEW_GUINEA", "PNG"),
        Paraguay => ("PARAGUAY", "PRY"),
        Peru => ("PERU", "PER"),
        Philippines => ("PHILIPPINES", "PHL"),
        Pitcairn => ("PITCAIRN", "PCN"),
        Poland => ("POLAND", "POL"),
        Portugal => ("PORTUGAL", "PRT"),
        PuertoRico => ("PUERTO_RICO", "PRI"),
        Qatar => ("QATAR", "QAT"),
        RepublicOfNorthMacedonia => ("REPUBLIC_OF_NORTH_MACEDONIA", "MKD"),
        Romania => ("ROMANIA", "ROU"),
        RussianFederation => ("RUSSIAN_FEDERATION", "RUS"),
        Rwanda => ("RWANDA", "RWA"),
        Reunion => ("REUNION", "REU"),
        SaintBarthelemy => ("SAINT_BARTHELEMY", "BLM"),
        SaintHelena => ("SAINT_HELENA", "SHN"),
        SaintKittsAndNevis => ("SAINT_KITTS_AND_NEVIS", "KNA"),
        SaintLucia => ("SAINT_LUCIA", "LCA"),
        SaintMartin => ("SAINT_MARTIN", "MAF"),
        SaintPierreAndMiquelon => ("SAINT_PIERRE_AND_MIQUELON", "SPM"),
        SaintVincentAndTheGrenadines => ("SAINT_VINCENT_AND_THE_GRENADINES", "VCT"),
        Samoa => ("SAMOA", "WSM"),
        SanMarino => ("SAN_MARINO", "SMR"),
        SaoTomeAndPrincipe => ("SAO_TOME_AND_PRINCIPE", "STP"),
        SaudiArabia => ("SAUDI_ARABIA", "SAU"),
        Senegal => ("SENEGAL", "SEN"),
        Serbia => ("SERBIA", "SRB"),
        Seychelles => ("SEYCHELLES", "SYC"),
        SierraLeone => ("SIERRA_LEONE", "SLE"),
        Singapore => ("SINGAPORE", "SGP"),
        SintMaarten => ("SINT_MAARTEN", "SXM"),
        Slovakia => ("SLOVAKIA", "SVK"),
        Slovenia => ("SLOVENIA", "SVN"),
        SolomonIslands => ("SOLOMON_ISLANDS", "SLB"),
        Somalia => ("SOMALIA", "SOM"),
        SouthAfrica => ("SOUTH_AFRICA", "ZAF"),
        SouthGeorgiaAndTheSouthSandwichIslands => ("SOUTH_GEORGIA_AND_THE_SOUTH_SANDWICH_ISLANDS", "SGS"),
        SouthSudan => ("SOUTH_SUDAN", "SSD"),
        Spain => ("SPAIN", "ESP"),
        SriLanka => ("SRI_LANKA", "LKA"),
        Sudan => ("SUDAN", "SDN"),
        Suriname => ("SURINAME", "SUR"),
        SvalbardAndJanMayen => ("SVALBARD_AND_JAN_MAYEN", "SJM"),
        Sweden => ("SWEDEN", "SWE"),
        Switzerland => ("SWITZERLAND", "CHE"),
        SyrianArabRepublic => ("SYRIAN_ARAB_REPUBLIC", "SYR"),
        Taiwan => ("TAIWAN", "TWN"),
        Tajikistan => ("TAJIKISTAN", "TJK"),
        Tanzania => ("TANZANIA", "TZA"),
        Thailand => ("THAILAND", "THA"),
        TimorLeste => ("TIMOR_LESTE", "TLS"),
        Togo => ("TOGO", "TGO"),
        Tokelau => ("TOKELAU", "TKL"),
        Tonga => ("TONGA", "TON"),
        TrinidadAndTobago => ("TRINIDAD_AND_TOBAGO", "TTO"),
        Tunisia => ("TUNISIA", "TUN"),
        Turkey => ("TURKEY", "TUR"),
        Turkmenistan => ("TURKMENISTAN", "TKM"),
        TurksAndCaicosIslands => ("TURKS_AND_CAICOS_ISLANDS", "TCA"),
        Tuvalu => ("TUVALU", "TUV"),
        Uganda => ("UGANDA", "UGA"),
        Ukraine => ("UKRAINE", "UKR"),
        UnitedArabEmirates => ("UNITED_ARAB_EMIRATES", "ARE"),
        UnitedKingdom => ("UNITED_KINGDOM", "GBR"),
        UnitedStatesMinorOutlyingIslands => ("UNITED_STATES_MINOR_OUTLYING_ISLANDS", "UMI"),
        UnitedStates => ("UNITED_STATES", "USA"),
        Uruguay => ("URUGUAY", "URY"),
        Uzbekistan => ("UZBEKISTAN", "UZB"),
        Vanuatu => ("VANUATU", "VUT"),
        Venezuela => ("VENEZUELA", "VEN"),
        VietNam => ("VIET_NAM", "VNM"),
        VirginIslandsBritish => ("VIRGIN_ISLANDS_BRITISH", "VGB"),
        VirginIslandsUs => ("VIRGIN_ISLANDS_US", "VIR"),
        WallisAndFutuna => ("WALLIS_AND_FUTUNA", "WLF"),
        WesternSahara => ("WESTERN_SAHARA", "ESH"),
        Yemen => ("YEMEN", "YEM"),
        Zambia => ("ZAMBIA", "ZMB"),
        Zimbabwe => ("ZIMBABWE", "ZWE"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::CodeEnum;

    #[test]
    fn test_country_codes() {
        assert_eq!(Country::Italy.value(), "ITA");
        assert_eq!(Country::Albania.value(), "ALB");
        assert_eq!(Country::UnitedKingdom.value(), "GBR");
        assert_eq!(Country::Germany.value(), "DEU");
    }

    #[test]
    fn test_country_lookup_by_name_or_code() {
        assert_eq!(Country::lookup("ITALY"), Some(Country::Italy));
        assert_eq!(Country::lookup("ITA"), Some(Country::Italy));
        assert_eq!(Country::lookup("Italy"), None);
    }

    #[test]
    fn test_country_codes_are_unique() {
        let mut codes: Vec<&str> = Country::ALL.iter().map(|c| c.value()).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }
}
