//! # Sitewright Model
//!
//! Shared data model for the website-builder component engine.
//!
//! - [`ComponentType`]: a reusable template + parameter schema for a kind of
//!   page element, owned by a shared [`TypeRegistry`].
//! - [`ComponentInstance`]: a placed, parameterized occurrence of a type on
//!   a page, owned by the page that contains it.
//! - [`RenderContext`]: derived render output — never authoritative, always
//!   safe to discard and recompute.
//! - [`ParamValue`]: the JSON-shaped runtime value for instance parameters.
//!
//! All backend-facing types serialize with the REST API's camelCase field
//! names so records round-trip the component-catalog and page CRUD endpoints
//! unchanged.

pub mod component;
pub mod order;
pub mod value;

pub use component::{
    ComponentInstance, ComponentType, DefaultParameters, ParameterDecl, ParameterKind,
    RenderContext, TypeRegistry,
};
pub use order::paint_order;
pub use value::{ParamValue, ParameterMap};
