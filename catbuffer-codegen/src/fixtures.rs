//! Schemas shared by the unit tests.

use catbuffer_schema::{Schema, parse_schema};

/// A slice of the transaction schema: legacy headers, a super-class, a
/// composed body, named sizes, flags, and `const` type codes.
pub(crate) const TRANSFER_SCHEMA: &str = r#"
- name: Amount
  type: byte
  size: 8
  comments: A quantity of mosaics
- name: Timestamp
  type: byte
  size: 8
- name: MosaicId
  type: byte
  size: 8
- name: UnresolvedAddress
  type: byte
  size: 24
- name: Signature
  type: byte
  size: 64
- name: EntityType
  type: enum
  size: 2
  values:
    - name: RESERVED
      value: 0
      comments: reserved entity type
- name: MosaicFlags
  type: enum
  size: 1
  is_flags: true
  values:
    - name: NONE
      value: 0
    - name: SUPPLY_MUTABLE
      value: 1
    - name: TRANSFERABLE
      value: 2
- name: SizePrefixedEntity
  type: struct
  layout:
    - name: size
      type: byte
      size: 4
- name: VerifiableEntity
  type: struct
  layout:
    - name: verifiableEntityHeader_Reserved1
      type: byte
      size: 4
    - name: signature
      type: Signature
- name: EntityBody
  type: struct
  layout:
    - name: signerPublicKey
      type: byte
      size: 32
    - name: entityBody_Reserved1
      type: byte
      size: 4
    - name: version
      type: byte
      size: 1
    - name: network
      type: byte
      size: 1
- name: EmbeddedTransactionHeader
  type: struct
  layout:
    - name: TRANSACTION_TYPE
      type: EntityType
      disposition: const
      value: RESERVED
    - name: embeddedTransactionHeader_Reserved1
      type: byte
      size: 4
- name: Transaction
  type: struct
  comments: binary layout for a transaction
  layout:
    - disposition: inline
      type: SizePrefixedEntity
    - disposition: inline
      type: VerifiableEntity
    - disposition: inline
      type: EntityBody
    - name: type
      type: EntityType
    - name: fee
      type: Amount
    - name: deadline
      type: Timestamp
- name: EmbeddedTransaction
  type: struct
  layout:
    - disposition: inline
      type: SizePrefixedEntity
    - disposition: inline
      type: EmbeddedTransactionHeader
    - disposition: inline
      type: EntityBody
    - name: type
      type: EntityType
- name: Mosaic
  type: struct
  layout:
    - name: mosaicId
      type: MosaicId
    - name: amount
      type: Amount
- name: TransferTransactionBody
  type: struct
  layout:
    - name: recipientAddress
      type: UnresolvedAddress
    - name: messageSize
      type: byte
      size: 2
    - name: mosaicsCount
      type: byte
      size: 1
    - name: mosaics
      type: Mosaic
      size: mosaicsCount
      sort_key: mosaicId
    - name: message
      type: byte
      size: messageSize
- name: TransferTransaction
  type: struct
  layout:
    - name: TRANSACTION_VERSION
      type: byte
      size: 1
      disposition: const
      value: 1
    - name: TRANSACTION_TYPE
      type: EntityType
      disposition: const
      value: 16724
    - disposition: inline
      type: Transaction
    - disposition: inline
      type: TransferTransactionBody
- name: EmbeddedTransferTransaction
  type: struct
  layout:
    - name: TRANSACTION_TYPE
      type: EntityType
      disposition: const
      value: 16724
    - disposition: inline
      type: EmbeddedTransaction
    - disposition: inline
      type: TransferTransactionBody
- name: MosaicDefinitionTransactionBody
  type: struct
  layout:
    - name: id
      type: MosaicId
    - name: flags
      type: MosaicFlags
    - name: divisibility
      type: byte
      size: 1
- name: MosaicDefinitionTransaction
  type: struct
  layout:
    - name: TRANSACTION_TYPE
      type: EntityType
      disposition: const
      value: 16717
    - disposition: inline
      type: Transaction
    - disposition: inline
      type: MosaicDefinitionTransactionBody
"#;

pub(crate) fn transfer_schema() -> Schema {
    parse_schema(TRANSFER_SCHEMA).expect("Failed to parse")
}

/// An aggregate layout: a composed body holding a sized `var` collection
/// of embedded transactions and a trailing `fill` collection.
pub(crate) const AGGREGATE_SCHEMA: &str = r#"
- name: Amount
  type: byte
  size: 8
- name: Hash256
  type: byte
  size: 32
- name: EmbeddedTransfer
  type: struct
  layout:
    - name: recipient
      type: byte
      size: 24
    - name: amount
      type: Amount
- name: Cosignature
  type: struct
  layout:
    - name: version
      type: byte
      size: 8
    - name: signature
      type: byte
      size: 64
- name: AggregateTransactionBody
  type: struct
  layout:
    - name: transactionsHash
      type: Hash256
    - name: payloadSize
      type: byte
      size: 4
    - name: aggregateTransactionHeader_Reserved1
      type: byte
      size: 4
    - name: transactions
      type: EmbeddedTransfer
      disposition: var
      size: payloadSize
    - name: cosignatures
      type: Cosignature
      disposition: fill
- name: AggregateTransaction
  type: struct
  layout:
    - name: size
      type: byte
      size: 4
    - disposition: inline
      type: AggregateTransactionBody
"#;

pub(crate) fn aggregate_schema() -> Schema {
    parse_schema(AGGREGATE_SCHEMA).expect("Failed to parse")
}
