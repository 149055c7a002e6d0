mod block_decoder;
pub use block_decoder::{
    BlockDecoder, DecodedParticle, DecodedParticles, RankBlock, RankBonds, RankParticles,
};

mod blockfile;
pub use blockfile::write_blockfile;

mod bond_record;
pub use bond_record::{BondRecord, BondRecords};
