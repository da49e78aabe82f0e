use sonarflow::FlowError;

pub const SUCCESS: i32 = 0;
/// Bad arguments, parameters, or a missing input file
pub const INPUT_ERROR: i32 = 1;
/// Malformed or unreadable input data
pub const DATA_ERROR: i32 = 2;
/// Result could not be serialized or written
pub const OUTPUT_ERROR: i32 = 3;

pub fn for_error(err: &FlowError) -> i32 {
    if err.is_data_error() {
        DATA_ERROR
    } else {
        INPUT_ERROR
    }
}
