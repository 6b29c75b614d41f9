//! ABI layout for the four events the decoders understand. Topic hashes
//! (`SIGNATURE_HASH`) are derived by `alloy_sol_types::sol!` at compile
//! time from the signatures below — there is no runtime keccak step.

alloy_sol_types::sol! {
    /// ERC-721 `Transfer(address indexed from, address indexed to, uint256
    /// indexed tokenId)`. Mint semantics are `from == 0x0`.
    event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);

    /// Marketplace order creation. Not anonymous; every field lives in the
    /// log's data section (no indexed params). ABI-driven decoding is the
    /// canonical path here, in preference to topic-indexed variants seen
    /// in other marketplace implementations.
    event OrderCreated(
        bytes32 orderId,
        address seller,
        address nftToken,
        uint256 tokenId,
        uint256 price,
        uint256 fee,
        bool isBid,
        bool isCollectionBid
    );

    event OrderCancelled(bytes32 indexed orderId, address indexed canceller);

    event OrderFilled(
        bytes32 indexed sellerOrderId,
        bytes32 indexed buyerOrderId,
        address seller,
        address buyer,
        uint256 tokenId,
        uint256 price,
        uint256 fee
    );
}
