//! Built-in corridor waypoints and the sea lanes joining them.
//!
//! Positions are `(latitude, longitude)` in decimal degrees and sit in open
//! water near the named feature. Lanes are undirected and chosen so the
//! straight segment between their endpoints stays off land at this scale.

/// Named corridor waypoints.
pub(crate) const CORRIDOR_NODES: &[(&str, f64, f64)] = &[
    // North-west Europe
    ("English Channel", 50.2, -1.0),
    ("Dover Strait", 51.0, 1.5),
    ("North Sea", 54.5, 3.5),
    ("Skagerrak", 57.8, 9.0),
    ("Baltic Sea", 56.0, 18.0),
    ("Bay of Biscay", 45.5, -6.0),
    ("Cape Finisterre", 43.0, -10.0),
    // Mediterranean and Suez
    ("Strait of Gibraltar", 35.95, -5.6),
    ("Alboran Sea", 36.0, -3.0),
    ("Western Mediterranean", 38.5, 5.0),
    ("Strait of Sicily", 37.2, 11.5),
    ("Ionian Sea", 36.5, 18.5),
    ("Aegean Sea", 37.5, 25.0),
    ("Eastern Mediterranean", 33.5, 29.0),
    ("Port Said", 31.3, 32.3),
    ("Suez", 29.9, 32.55),
    ("Red Sea North", 26.0, 35.0),
    ("Red Sea South", 16.0, 41.0),
    ("Bab el-Mandeb", 12.6, 43.3),
    // Indian Ocean
    ("Gulf of Aden", 12.5, 48.0),
    ("Somali Basin", 2.0, 52.0),
    ("Arabian Sea", 15.0, 62.0),
    ("Strait of Hormuz", 26.5, 56.5),
    ("Persian Gulf", 27.0, 51.0),
    ("Laccadive Sea", 7.0, 75.0),
    ("Dondra Head", 5.5, 80.6),
    ("Bay of Bengal", 14.0, 88.0),
    ("Central Indian Ocean", -10.0, 80.0),
    ("Mombasa Approaches", -4.5, 41.0),
    ("Comoros", -11.5, 43.5),
    ("Mozambique Channel", -18.0, 40.5),
    ("Durban Approaches", -31.5, 33.0),
    ("Cape of Good Hope", -35.0, 18.5),
    // South-east Asia and the western Pacific
    ("Malacca Strait", 3.0, 100.5),
    ("Singapore Strait", 1.2, 104.0),
    ("South China Sea", 12.0, 113.0),
    ("Luzon Strait", 20.5, 121.0),
    ("Taiwan Strait", 24.0, 119.5),
    ("East China Sea", 30.0, 125.0),
    ("Korea Strait", 34.5, 129.0),
    ("Tokyo Approaches", 34.5, 140.0),
    ("Java Sea", -5.0, 111.0),
    ("Sunda Strait", -6.0, 105.8),
    ("Lombok Strait", -8.8, 115.7),
    ("Western Pacific", 30.0, 160.0),
    // Australasia
    ("Timor Sea", -11.0, 127.0),
    ("Torres Strait", -10.5, 142.0),
    ("Coral Sea", -18.0, 155.0),
    ("Tasman Sea", -36.0, 160.0),
    ("Bass Strait", -39.5, 146.0),
    ("Great Australian Bight", -36.0, 130.0),
    ("Cape Leeuwin", -35.5, 114.5),
    // Eastern Pacific and the Americas
    ("North Pacific", 40.0, -160.0),
    ("Hawaii", 21.0, -157.0),
    ("Pacific Northwest", 48.0, -126.0),
    ("San Francisco Approaches", 37.5, -123.0),
    ("Los Angeles Approaches", 33.5, -118.5),
    ("Baja California", 22.0, -110.0),
    ("Eastern Pacific", 10.0, -95.0),
    ("Panama Balboa", 8.8, -79.5),
    ("Panama Colon", 9.5, -79.9),
    ("Peru Coast", -12.0, -78.5),
    ("Chile Coast", -33.0, -73.0),
    ("Cape Horn", -57.0, -67.0),
    ("Rio de la Plata", -36.0, -55.0),
    ("Brazil Bulge", -7.0, -34.0),
    ("Amazon Approaches", 4.0, -47.0),
    ("Trinidad Approaches", 11.5, -60.0),
    ("Caribbean Sea", 15.0, -75.0),
    ("Windward Passage", 20.0, -73.8),
    ("Gulf of Mexico", 26.0, -90.0),
    ("Florida Strait", 24.2, -81.0),
    ("Cape Hatteras", 35.0, -74.5),
    ("New York Approaches", 40.2, -73.0),
    ("Newfoundland", 45.0, -50.0),
    // Atlantic
    ("North Atlantic", 48.0, -30.0),
    ("Mid Atlantic", 35.0, -40.0),
    ("Azores", 38.5, -28.0),
    ("Canary Islands", 28.0, -16.0),
    ("Cape Verde", 15.0, -20.0),
    ("Liberia Coast", 5.0, -12.0),
    ("Gulf of Guinea", 2.0, 3.0),
    ("South Atlantic", -20.0, -20.0),
];

/// Sea lanes between corridor waypoints, by name.
pub(crate) const CORRIDOR_LANES: &[(&str, &str)] = &[
    ("English Channel", "Dover Strait"),
    ("Dover Strait", "North Sea"),
    ("North Sea", "Skagerrak"),
    ("Skagerrak", "Baltic Sea"),
    ("English Channel", "Bay of Biscay"),
    ("English Channel", "North Atlantic"),
    ("Bay of Biscay", "Cape Finisterre"),
    ("Cape Finisterre", "Strait of Gibraltar"),
    ("Cape Finisterre", "Azores"),
    ("Cape Finisterre", "Canary Islands"),
    ("Strait of Gibraltar", "Alboran Sea"),
    ("Strait of Gibraltar", "Canary Islands"),
    ("Alboran Sea", "Western Mediterranean"),
    ("Western Mediterranean", "Strait of Sicily"),
    ("Strait of Sicily", "Ionian Sea"),
    ("Ionian Sea", "Aegean Sea"),
    ("Ionian Sea", "Eastern Mediterranean"),
    ("Aegean Sea", "Eastern Mediterranean"),
    ("Eastern Mediterranean", "Port Said"),
    ("Port Said", "Suez"),
    ("Suez", "Red Sea North"),
    ("Red Sea North", "Red Sea South"),
    ("Red Sea South", "Bab el-Mandeb"),
    ("Bab el-Mandeb", "Gulf of Aden"),
    ("Gulf of Aden", "Arabian Sea"),
    ("Gulf of Aden", "Somali Basin"),
    ("Arabian Sea", "Strait of Hormuz"),
    ("Strait of Hormuz", "Persian Gulf"),
    ("Arabian Sea", "Laccadive Sea"),
    ("Arabian Sea", "Somali Basin"),
    ("Laccadive Sea", "Dondra Head"),
    ("Dondra Head", "Bay of Bengal"),
    ("Dondra Head", "Malacca Strait"),
    ("Dondra Head", "Central Indian Ocean"),
    ("Bay of Bengal", "Malacca Strait"),
    ("Malacca Strait", "Singapore Strait"),
    ("Singapore Strait", "South China Sea"),
    ("Singapore Strait", "Java Sea"),
    ("South China Sea", "Luzon Strait"),
    ("South China Sea", "Taiwan Strait"),
    ("Taiwan Strait", "East China Sea"),
    ("East China Sea", "Korea Strait"),
    ("Korea Strait", "Tokyo Approaches"),
    ("Luzon Strait", "Tokyo Approaches"),
    ("Tokyo Approaches", "Western Pacific"),
    ("Western Pacific", "North Pacific"),
    ("Western Pacific", "Hawaii"),
    ("North Pacific", "Pacific Northwest"),
    ("North Pacific", "San Francisco Approaches"),
    ("Hawaii", "Los Angeles Approaches"),
    ("Pacific Northwest", "San Francisco Approaches"),
    ("San Francisco Approaches", "Los Angeles Approaches"),
    ("Los Angeles Approaches", "Baja California"),
    ("Baja California", "Eastern Pacific"),
    ("Eastern Pacific", "Panama Balboa"),
    ("Panama Balboa", "Panama Colon"),
    ("Panama Balboa", "Peru Coast"),
    ("Panama Colon", "Caribbean Sea"),
    ("Caribbean Sea", "Windward Passage"),
    ("Caribbean Sea", "Gulf of Mexico"),
    ("Caribbean Sea", "Trinidad Approaches"),
    ("Windward Passage", "Cape Hatteras"),
    ("Gulf of Mexico", "Florida Strait"),
    ("Florida Strait", "Cape Hatteras"),
    ("Cape Hatteras", "New York Approaches"),
    ("Cape Hatteras", "Mid Atlantic"),
    ("New York Approaches", "Newfoundland"),
    ("Newfoundland", "North Atlantic"),
    ("Mid Atlantic", "Azores"),
    ("Azores", "North Atlantic"),
    ("Trinidad Approaches", "Amazon Approaches"),
    ("Trinidad Approaches", "Mid Atlantic"),
    ("Amazon Approaches", "Brazil Bulge"),
    ("Peru Coast", "Chile Coast"),
    ("Chile Coast", "Cape Horn"),
    ("Cape Horn", "Rio de la Plata"),
    ("Rio de la Plata", "Brazil Bulge"),
    ("Brazil Bulge", "South Atlantic"),
    ("Brazil Bulge", "Cape Verde"),
    ("South Atlantic", "Cape of Good Hope"),
    ("South Atlantic", "Gulf of Guinea"),
    ("Canary Islands", "Cape Verde"),
    ("Cape Verde", "Liberia Coast"),
    ("Liberia Coast", "Gulf of Guinea"),
    ("Gulf of Guinea", "Cape of Good Hope"),
    ("Cape of Good Hope", "Durban Approaches"),
    ("Cape of Good Hope", "Cape Leeuwin"),
    ("Durban Approaches", "Mozambique Channel"),
    ("Mozambique Channel", "Comoros"),
    ("Comoros", "Mombasa Approaches"),
    ("Mombasa Approaches", "Somali Basin"),
    ("Somali Basin", "Central Indian Ocean"),
    ("Central Indian Ocean", "Sunda Strait"),
    ("Central Indian Ocean", "Cape Leeuwin"),
    ("Sunda Strait", "Java Sea"),
    ("Java Sea", "Lombok Strait"),
    ("Lombok Strait", "Timor Sea"),
    ("Timor Sea", "Torres Strait"),
    ("Torres Strait", "Coral Sea"),
    ("Coral Sea", "Tasman Sea"),
    ("Coral Sea", "Western Pacific"),
    ("Coral Sea", "Hawaii"),
    ("Tasman Sea", "Bass Strait"),
    ("Bass Strait", "Great Australian Bight"),
    ("Great Australian Bight", "Cape Leeuwin"),
    ("Cape Leeuwin", "Sunda Strait"),
];
