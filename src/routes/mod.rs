pub mod routing_routes;
pub mod team_routes;
