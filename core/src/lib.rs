pub mod game_id;
pub mod highlight;
pub mod protocol;
pub mod puzzle;

pub use game_id::{
    decode_game_id, encode_game_id, is_valid_game_id, GameId, GameIdError, GAME_ID_LEN,
};
pub use highlight::{reconcile, HighlightMap, HIGHLIGHT_COLOR, HIGHLIGHT_DECAY_MS};
pub use protocol::{
    decode_game_update, encode_subscribe, GameByIdData, GameRecord, GameUpdate, GameVariables,
    GraphqlRequest, GraphqlResponse, GAME_QUERY,
};
pub use puzzle::{Clues, DataContractError, Puzzle, PuzzleError, PuzzleSize, BLOCK};
