//! Stable error codes exposed by `taproot-core`.

use taproot_core::{
    CodecError, CodecErrorCode, DisjointSetError, HeapError, HeapErrorCode, MstError, MstErrorCode, SourceError,
    SourceErrorCode, StageErrorCode, TaprootError, TaprootErrorCode, TreeError, TreeErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(HeapError::EmptyHeap, HeapErrorCode::EmptyHeap, "HEAP_EMPTY")]
#[case(
    HeapError::IndexOutOfRange { index: 3, len: 2 },
    HeapErrorCode::IndexOutOfRange,
    "HEAP_INDEX_OUT_OF_RANGE",
)]
fn returns_expected_heap_code(
    #[case] error: HeapError,
    #[case] expected: HeapErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(expected.to_string(), text);
}

#[rstest]
#[case(MstError::EmptyGraph, MstErrorCode::EmptyGraph)]
#[case(
    MstError::DisconnectedGraph { components: 2 },
    MstErrorCode::DisconnectedGraph,
)]
#[case(MstError::UnsortedEdges { index: 4 }, MstErrorCode::UnsortedEdges)]
#[case(MstError::Heap(HeapError::EmptyHeap), MstErrorCode::HeapFailure)]
#[case(
    MstError::UnreachableNodes { start: 0, unreached: 3 },
    MstErrorCode::UnreachableNodes,
)]
#[case(
    MstError::DisjointSet(DisjointSetError::NotRepresentative { node: 0, representative: 1 }),
    MstErrorCode::DisjointSetFailure,
)]
fn returns_expected_mst_code(#[case] error: MstError, #[case] expected: MstErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(
    TaprootError::EmptySource { source_name: "empty".to_owned() },
    TaprootErrorCode::EmptySource,
    None,
)]
#[case(
    TaprootError::InvalidStartNode { start: 4, node_count: 2 },
    TaprootErrorCode::InvalidStartNode,
    None,
)]
#[case(
    TaprootError::PresortedEdgesUnsupported,
    TaprootErrorCode::PresortedEdgesUnsupported,
    None,
)]
#[case(
    TaprootError::from(SourceError::OutOfBounds { index: 1, len: 1 }),
    TaprootErrorCode::SourceFailure,
    Some(StageErrorCode::Source(SourceErrorCode::OutOfBounds)),
)]
#[case(
    TaprootError::from(MstError::DisconnectedGraph { components: 3 }),
    TaprootErrorCode::MstFailure,
    Some(StageErrorCode::Mst(MstErrorCode::DisconnectedGraph)),
)]
#[case(
    TaprootError::from(TreeError::EmptyTree),
    TaprootErrorCode::TreeFailure,
    Some(StageErrorCode::Tree(TreeErrorCode::EmptyTree)),
)]
#[case(
    TaprootError::from(CodecError::BrokenParentChain { node: 2 }),
    TaprootErrorCode::CodecFailure,
    Some(StageErrorCode::Codec(CodecErrorCode::BrokenParentChain)),
)]
fn returns_expected_taproot_code(
    #[case] error: TaprootError,
    #[case] expected: TaprootErrorCode,
    #[case] stage: Option<StageErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.stage_code(), stage);
    assert_eq!(
        stage.map(StageErrorCode::as_str),
        stage.map(|code| code.to_string()).as_deref()
    );
}
