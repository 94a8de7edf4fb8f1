mod helpers;
mod relational;
