pub mod parse_dto;
