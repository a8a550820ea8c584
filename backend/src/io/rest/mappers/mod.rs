pub mod product_mapper;
