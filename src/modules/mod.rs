pub mod kartchrono_api;
pub mod models {
    pub mod race;
    pub mod cart;
    pub mod lap;
    pub mod competitor;
}

pub mod parsers {
    pub mod archive;
    pub mod race_results;
    pub mod embedded_object;
    pub mod binary_laps;
    pub mod competitors;
}

pub mod helpers {
    pub mod time;
    pub mod html;
    pub mod lap_table;

    pub mod logging;
}
