//! The Tippecanoe option table.
//!
//! Options are listed in command-line order. Flags follow the tippecanoe
//! README; labels and help texts are what the form shows next to each field.

use super::{
    Condition, EmitWhen, ExclusiveGroup, FlagTemplate, OptionDef, OptionKind, Quoting, Schema,
    SchemaError, Section, Value,
};

pub const PROGRAM: &str = "tippecanoe";

pub const OUTPUT_FORMATS: &[&str] = &["mbtiles", "pmtiles", "directory"];
pub const ZOOM_MODES: &[&str] = &["specify", "auto-detect"];
pub const CLUSTER_METHODS: &[&str] = &["none", "fixed-distance", "densest-as-needed"];
pub const ATTRIBUTE_MODES: &[&str] = &["keep-all", "include-only", "exclude-some", "exclude-all"];
pub const PROJECTIONS: &[&str] = &["epsg-4326", "epsg-3857"];

const DROP_FLAGS: &[(&str, &str)] = &[
    ("drop-densest-as-needed", "-as"),
    ("drop-fraction-as-needed", "-ad"),
    ("drop-smallest-as-needed", "-an"),
    ("coalesce-densest-as-needed", "-aD"),
    ("coalesce-smallest-as-needed", "-aN"),
    ("coalesce-fraction-as-needed", "-aS"),
    ("no-line-simplification", "-ps"),
    ("no-tiny-polygon-reduction", "-pt"),
    ("no-feature-limit", "-pf"),
    ("no-tile-size-limit", "-pk"),
];

pub const DROP_OPTIONS: &[&str] = &[
    "drop-densest-as-needed",
    "drop-fraction-as-needed",
    "drop-smallest-as-needed",
    "coalesce-densest-as-needed",
    "coalesce-smallest-as-needed",
    "coalesce-fraction-as-needed",
    "no-line-simplification",
    "no-tiny-polygon-reduction",
    "no-feature-limit",
    "no-tile-size-limit",
];

const TARGET_EXTENSIONS: &[(&str, &str)] = &[("mbtiles", ".mbtiles"), ("pmtiles", ".pmtiles")];

const ZOOM_MODE_TOKENS: &[(&str, &[&str])] = &[("specify", &[]), ("auto-detect", &["-zg"])];

const CLUSTER_METHOD_TOKENS: &[(&str, &[&str])] = &[
    ("none", &[]),
    ("fixed-distance", &[]),
    ("densest-as-needed", &["-aC"]),
];

const ATTRIBUTE_MODE_TOKENS: &[(&str, &[&str])] = &[
    ("keep-all", &[]),
    ("include-only", &[]),
    ("exclude-some", &[]),
    ("exclude-all", &["-X"]),
];

const PROJECTION_TOKENS: &[(&str, &[&str])] =
    &[("epsg-4326", &[]), ("epsg-3857", &["-s", "EPSG:3857"])];

const OUTPUT_GROUP: &[(&str, Option<&str>)] = &[
    ("mbtiles", Some("output_file")),
    ("pmtiles", Some("output_file")),
    ("directory", Some("output_dir")),
];

const ZOOM_GROUP: &[(&str, Option<&str>)] = &[("specify", Some("max_zoom")), ("auto-detect", None)];

const ZOOM: OptionKind = OptionKind::Integer { min: 0, max: 22 };
const DETAIL: OptionKind = OptionKind::Integer { min: 0, max: 32 };
const COUNT: OptionKind = OptionKind::Integer {
    min: 0,
    max: i64::MAX,
};
const FACTOR: OptionKind = OptionKind::Float {
    min: 0.0,
    max: f64::INFINITY,
};

/// Builds and validates the Tippecanoe schema.
pub fn schema() -> Result<Schema, SchemaError> {
    Schema::new(PROGRAM, options(), groups())
}

fn groups() -> Vec<ExclusiveGroup> {
    vec![
        ExclusiveGroup {
            name: "output target",
            selector: "output_format",
            members: OUTPUT_GROUP,
        },
        ExclusiveGroup {
            name: "zoom mode",
            selector: "zoom_mode",
            members: ZOOM_GROUP,
        },
    ]
}

fn options() -> Vec<OptionDef> {
    let mut options = Vec::new();
    options.extend(output_options());
    options.extend(metadata_options());
    options.extend(zoom_options());
    options.extend(detail_options());
    options.extend(feature_options());
    options.extend(attribute_options());
    options.extend(advanced_options());
    options
}

fn output_options() -> Vec<OptionDef> {
    use Section::Output;

    vec![
        OptionDef::new(
            "output_format",
            Output,
            OptionKind::Choice(OUTPUT_FORMATS),
            Value::choice("mbtiles"),
        )
        .label("Output Format")
        .help("Format of the output tileset")
        .structural(),
        OptionDef::new(
            "output_file",
            Output,
            OptionKind::Text,
            Value::text("output.mbtiles"),
        )
        .label("Output Filename")
        .help("Name of the output file; the extension follows the output format")
        .template(FlagTemplate::TargetFile {
            flag: "-o",
            selector: "output_format",
            extensions: TARGET_EXTENSIONS,
        })
        .enabled_when(Condition::IsNot("output_format", "directory"))
        .structural(),
        OptionDef::new(
            "output_dir",
            Output,
            OptionKind::Text,
            Value::text("output_tiles"),
        )
        .label("Output Directory")
        .help("Directory to write the tiles to")
        .template(FlagTemplate::Separate("-e", Quoting::IfNeeded))
        .enabled_when(Condition::Is("output_format", "directory"))
        .structural(),
        OptionDef::switch("force_overwrite", Output, "-f")
            .label("Force Overwrite")
            .help("Delete the output file if it already exists"),
        OptionDef::switch("read_parallel", Output, "-P")
            .label("Parallel Processing")
            .help(
                "Read different parts of each GeoJSON input file in parallel; \
                 only works for line-delimited features",
            ),
    ]
}

fn metadata_options() -> Vec<OptionDef> {
    use Section::Metadata;

    let text = |name: &'static str, label: &'static str, help: &'static str, flag: &'static str| {
        OptionDef::new(name, Metadata, OptionKind::Text, Value::text(""))
            .label(label)
            .help(help)
            .template(FlagTemplate::Separate(flag, Quoting::Always))
            .emit_when(EmitWhen::NonEmpty)
    };

    vec![
        text(
            "name",
            "Tileset Name",
            "Human-readable name for the tileset",
            "-n",
        ),
        text(
            "description",
            "Description",
            "Description for the tileset",
            "-N",
        ),
        text(
            "attribution",
            "Attribution",
            "Attribution text shown with maps using this tileset",
            "-A",
        ),
    ]
}

fn zoom_options() -> Vec<OptionDef> {
    use Section::Zoom;

    vec![
        OptionDef::new(
            "zoom_mode",
            Zoom,
            OptionKind::Choice(ZOOM_MODES),
            Value::choice("specify"),
        )
        .label("Maximum Zoom Mode")
        .help("Specify the maximum zoom, or let tippecanoe guess it from the data")
        .template(FlagTemplate::PerChoice(ZOOM_MODE_TOKENS))
        .structural(),
        OptionDef::new("max_zoom", Zoom, ZOOM, Value::Int(14))
            .label("Maximum Zoom")
            .help("Highest zoom level for which tiles are generated")
            .template(FlagTemplate::Attached("-z"))
            .enabled_when(Condition::Is("zoom_mode", "specify"))
            .structural(),
        OptionDef::new("min_zoom", Zoom, ZOOM, Value::Int(0))
            .label("Minimum Zoom")
            .help("Lowest zoom level for which tiles are generated")
            .template(FlagTemplate::Attached("-Z")),
        OptionDef::switch("extend_zooms", Zoom, "-ae")
            .label("Extend Zooms If Still Dropping")
            .help("Increase the maxzoom if features are still being dropped at that zoom level"),
    ]
}

fn detail_options() -> Vec<OptionDef> {
    use Section::Detail;

    let manual = Condition::Flag("auto_detail", false);

    vec![
        OptionDef::new("auto_detail", Detail, OptionKind::Bool, Value::Bool(true))
            .label("Auto Tile Resolution")
            .help("Let tippecanoe choose tile resolutions"),
        OptionDef::new("full_detail", Detail, DETAIL, Value::Int(12))
            .label("Full Detail")
            .help("Detail at max zoom level (tile resolution = 2^detail)")
            .template(FlagTemplate::Attached("-d"))
            .enabled_when(manual),
        OptionDef::new("low_detail", Detail, DETAIL, Value::Int(12))
            .label("Low Detail")
            .help("Detail at lower zoom levels")
            .template(FlagTemplate::Attached("-D"))
            .enabled_when(manual),
        OptionDef::new("min_detail", Detail, DETAIL, Value::Int(7))
            .label("Minimum Detail")
            .help("Minimum detail to try if tiles are too big at regular detail")
            .template(FlagTemplate::Attached("-m"))
            .enabled_when(manual),
    ]
}

fn feature_options() -> Vec<OptionDef> {
    use Section::Features;

    let fixed_distance = Condition::Is("cluster_method", "fixed-distance");

    vec![
        OptionDef::new(
            "drop_options",
            Features,
            OptionKind::MultiChoice(DROP_OPTIONS),
            Value::Set(Vec::new()),
        )
        .label("Drop Options")
        .help("Ways to drop or coalesce features to keep tiles under size limits")
        .template(FlagTemplate::PerMember(DROP_FLAGS))
        .emit_when(EmitWhen::NonEmpty),
        OptionDef::new("drop_rate", Features, FACTOR, Value::Float(2.5))
            .label("Drop Rate")
            .help("Rate at which features are dropped at zoom levels below basezoom")
            .template(FlagTemplate::Attached("-r")),
        OptionDef::new(
            "cluster_method",
            Features,
            OptionKind::Choice(CLUSTER_METHODS),
            Value::choice("none"),
        )
        .label("Clustering Method")
        .help("Method for clustering points")
        .template(FlagTemplate::PerChoice(CLUSTER_METHOD_TOKENS))
        .structural(),
        OptionDef::new(
            "cluster_distance",
            Features,
            OptionKind::Integer { min: 1, max: 255 },
            Value::Int(10),
        )
        .label("Cluster Distance")
        .help("Cluster points within this distance")
        .template(FlagTemplate::Attached("-K"))
        .enabled_when(fixed_distance)
        .structural(),
        OptionDef::new("cluster_maxzoom", Features, ZOOM, Value::Int(14))
            .label("Cluster Max Zoom")
            .help("Maximum zoom at which to cluster points")
            .template(FlagTemplate::Attached("-k"))
            .enabled_when(fixed_distance)
            .structural(),
        OptionDef::new(
            "accumulate_attributes",
            Features,
            OptionKind::CommaList,
            Value::List(Vec::new()),
        )
        .label("Accumulate Attributes")
        .help("Attributes kept from clustered features, as attr:operation (e.g. population:sum)")
        .template(FlagTemplate::EachAttached("-E"))
        .enabled_when(Condition::IsNot("cluster_method", "none"))
        .emit_when(EmitWhen::NonEmpty),
        OptionDef::switch("feature_density", Features, "-ag")
            .label("Calculate Feature Density")
            .help("Add a tippecanoe_feature_density attribute to each feature"),
        OptionDef::switch("shared_borders", Features, "-ab")
            .label("Detect Shared Borders")
            .help("Simplify borders shared between polygons identically in each polygon"),
        OptionDef::switch("grid_low_zooms", Features, "-aL")
            .label("Grid Low Zooms")
            .help("Snap lines and polygons to a stairstep grid below maxzoom"),
    ]
}

fn attribute_options() -> Vec<OptionDef> {
    use Section::Attributes;

    let lines = |name: &'static str, label: &'static str, help: &'static str, flag: &'static str| {
        OptionDef::new(name, Attributes, OptionKind::Lines, Value::List(Vec::new()))
            .label(label)
            .help(help)
            .template(FlagTemplate::EachSeparate(flag, Quoting::IfNeeded))
            .emit_when(EmitWhen::NonEmpty)
    };

    vec![
        OptionDef::new(
            "attribute_mode",
            Attributes,
            OptionKind::Choice(ATTRIBUTE_MODES),
            Value::choice("keep-all"),
        )
        .label("Attribute Mode")
        .help("How to handle feature attributes")
        .template(FlagTemplate::PerChoice(ATTRIBUTE_MODE_TOKENS))
        .structural(),
        lines(
            "include_attributes",
            "Include Attributes",
            "Only these attributes will be included in the output",
            "-y",
        )
        .enabled_when(Condition::Is("attribute_mode", "include-only")),
        lines(
            "exclude_attributes",
            "Exclude Attributes",
            "These attributes will be excluded from the output",
            "-x",
        )
        .enabled_when(Condition::Is("attribute_mode", "exclude-some")),
        OptionDef::switch("generate_ids", Attributes, "-ai")
            .label("Generate IDs")
            .help("Add an ID to each feature that doesn't already have one"),
        lines(
            "attribute_types",
            "Attribute Types",
            "Coerce attributes to a type, one attr:type per line (string, float, int, bool)",
            "-T",
        ),
        lines(
            "set_attributes",
            "Set Attributes",
            "Set an attribute on all features, one attr:value per line",
            "--set-attribute",
        ),
    ]
}

fn advanced_options() -> Vec<OptionDef> {
    use Section::Advanced;

    let count = |name: &'static str,
                 label: &'static str,
                 help: &'static str,
                 flag: &'static str,
                 default: i64| {
        OptionDef::new(name, Advanced, COUNT, Value::Int(default))
            .label(label)
            .help(help)
            .template(FlagTemplate::Separate(flag, Quoting::Never))
    };

    vec![
        count(
            "buffer_size",
            "Buffer Size",
            "Buffer size where features are duplicated from adjacent tiles",
            "-b",
            5,
        ),
        OptionDef::new("simplification", Advanced, FACTOR, Value::Float(1.0))
            .label("Simplification")
            .help("Multiply the tolerance for line and polygon simplification")
            .template(FlagTemplate::Separate("-S", Quoting::Never)),
        OptionDef::new(
            "projection",
            Advanced,
            OptionKind::Choice(PROJECTIONS),
            Value::choice("epsg-4326"),
        )
        .label("Projection")
        .help("Projection of the input data: WGS84 (EPSG:4326) or Web Mercator (EPSG:3857)")
        .template(FlagTemplate::PerChoice(PROJECTION_TOKENS)),
        OptionDef::switch("no_clipping", Advanced, "-pc")
            .label("No Clipping")
            .help("Don't clip features to the size of the tile"),
        OptionDef::switch("no_duplication", Advanced, "-pD")
            .label("No Duplication")
            .help("Don't duplicate features between tiles"),
        OptionDef::new("feature_filter", Advanced, OptionKind::Text, Value::text(""))
            .label("Feature Filter")
            .help("Filter features using a Mapbox GL Style expression (JSON)")
            .template(FlagTemplate::Separate("-j", Quoting::Always))
            .emit_when(EmitWhen::NonEmpty),
        count(
            "max_tile_bytes",
            "Max Tile Bytes",
            "Maximum compressed tile size in bytes",
            "-M",
            500_000,
        ),
        count(
            "max_tile_features",
            "Max Tile Features",
            "Maximum number of features in a tile",
            "-O",
            200_000,
        ),
        OptionDef::switch("preserve_input_order", Advanced, "-pi")
            .label("Preserve Input Order")
            .help("Preserve the original input order of features as the drawing order"),
        OptionDef::switch("no_tile_compression", Advanced, "-pC")
            .label("No Tile Compression")
            .help("Don't compress the PBF vector tile data"),
    ]
}
