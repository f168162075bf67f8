/// ETL Module
///
/// - Extract: validate Geyser updates into transactions
/// - Transform: match, decode and enrich pump.fun `create` instructions
/// - Load: hand finished records to an output sink
pub mod extract;
pub mod load;
pub mod parsers;
pub mod transform;
