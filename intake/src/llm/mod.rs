mod response;

pub use response::parse_json_response;
