//! Built-in starting configurations for common tiling jobs.
//!
//! Each recipe is a list of option edits plus one input file, taken from the
//! example commands in the tippecanoe README.

use crate::input::InputFile;
use crate::options::OptionError;
use crate::session::Session;

#[derive(Debug)]
pub struct Recipe {
    pub name: &'static str,
    pub description: &'static str,
    pub settings: &'static [(&'static str, &'static str)],
    pub input: &'static str,
}

impl Recipe {
    /// Applies the recipe's settings and input file to a session.
    pub fn apply(&self, session: &mut Session) -> Result<(), OptionError> {
        for (name, value) in self.settings {
            session.set_str(name, value)?;
        }
        session.push_input(InputFile::new(self.input, ""));
        Ok(())
    }
}

pub const RECIPES: &[Recipe] = &[
    Recipe {
        name: "railroads",
        description: "Linear features (world railroads), visible at all zoom levels",
        settings: &[
            ("zoom_mode", "auto-detect"),
            ("output_file", "ne_10m_railroads"),
            ("drop_options", "drop-densest-as-needed"),
            ("extend_zooms", "true"),
        ],
        input: "ne_10m_railroads.geojson",
    },
    Recipe {
        name: "buildings",
        description: "Discontinuous polygon features (buildings), visible at all zoom levels",
        settings: &[
            ("zoom_mode", "auto-detect"),
            ("output_file", "buildings"),
            ("drop_options", "drop-densest-as-needed"),
            ("extend_zooms", "true"),
        ],
        input: "buildings.geojson",
    },
    Recipe {
        name: "states",
        description: "Continuous polygon features (states and provinces), visible at all zoom levels",
        settings: &[
            ("zoom_mode", "auto-detect"),
            ("output_file", "ne_10m_admin_1_states_provinces"),
            ("drop_options", "coalesce-densest-as-needed"),
            ("extend_zooms", "true"),
        ],
        input: "ne_10m_admin_1_states_provinces.geojson",
    },
    Recipe {
        name: "bus-locations",
        description: "Large point dataset (GPS bus locations), for visualization at all zoom levels",
        settings: &[
            ("zoom_mode", "auto-detect"),
            ("output_file", "bus_locations"),
            ("drop_options", "drop-densest-as-needed"),
            ("extend_zooms", "true"),
        ],
        input: "bus_locations.csv",
    },
    Recipe {
        name: "clustered-cities",
        description: "Clustered points (world cities), summing the clustered population",
        settings: &[
            ("zoom_mode", "auto-detect"),
            ("output_file", "ne_10m_populated_places"),
            ("drop_rate", "1"),
            ("cluster_method", "fixed-distance"),
            ("cluster_distance", "10"),
            ("accumulate_attributes", "POP_MAX:sum"),
        ],
        input: "ne_10m_populated_places.geojson",
    },
];

pub fn find(name: &str) -> Option<&'static Recipe> {
    RECIPES.iter().find(|recipe| recipe.name == name)
}

/// Comma-separated recipe names, for error messages.
pub fn names() -> String {
    RECIPES
        .iter()
        .map(|recipe| recipe.name)
        .collect::<Vec<_>>()
        .join(", ")
}
