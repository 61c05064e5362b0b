pub mod open_route;
