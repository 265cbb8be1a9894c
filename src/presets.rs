pub const PRESET_DEMO: &str = r#"[generate]
chains_min = 1
chains_max = 3
standalone_min = 2
standalone_max = 5
runtime_probability = 0.5

[output]
dirs = ["data/generated", "output", "react-dashboard/public/data"]
pretty = true
"#;

pub const PRESET_CI: &str = r#"[generate]
seed = 1337
chains_min = 1
chains_max = 3
standalone_min = 2
standalone_max = 5
runtime_probability = 0.5

[output]
dirs = ["data/generated"]
pretty = false
"#;

pub const PRESET_COMPACT: &str = r#"[generate]
chains_min = 1
chains_max = 1
standalone_min = 0
standalone_max = 2
runtime_probability = 0.25

[output]
dirs = ["data/generated", "react-dashboard/public/data"]
pretty = true
"#;
