//! Shared constants: thresholds, regexes and default path filters.

mod limits;
mod regexes;
mod sets;

pub use limits::{
    COMPLEXITY_SEVERE, COMPLEXITY_WARN, CONFIG_FILENAME, DEFAULT_STD_PREFIX, DOC_LOOKBACK_LINES,
    DUPLICATE_WINDOW, MAX_FAN_IN, MAX_FAN_OUT, MAX_FILE_LOC, MAX_FILE_METHODS, MAX_PARAMETERS,
    METHOD_LINES_SEVERE, METHOD_LINES_WARN, MIN_DOC_RATIO, MIN_DOC_RATIO_FILE_LOC, SOURCE_EXTENSION,
};
pub use regexes::{
    get_decision_keyword_re, get_namespace_re, get_signature_re, get_type_re, get_using_re,
};
pub use sets::get_default_exclude_folders;
