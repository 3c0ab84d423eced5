// Reference application for the Solidus framework: a users CRUD backed by a
// flat file. The src/routes/ tree is the URL namespace.

pub mod routes;
pub mod services;
