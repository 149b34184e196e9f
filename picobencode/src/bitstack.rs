// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity stacks of single bits.
//!
//! The encoder pushes one bit per open container (dictionary or list), so the
//! capacity of the stack type is the deepest nesting it can write.

/// A stack of bits with a capacity fixed by its type.
///
/// Pushing beyond [`BitStack::capacity`] silently drops the oldest bit; callers
/// count depth themselves and stop before that happens.
pub trait BitStack {
    /// An empty stack.
    fn default() -> Self;
    fn push(&mut self, bit: bool);
    /// Removes and returns the newest bit. An empty stack yields `false`.
    fn pop(&mut self) -> bool;
    /// The newest bit, without removing it.
    fn top(&self) -> bool;
    /// Number of bits the stack holds.
    fn capacity() -> usize;
}

/// Several machine words chained into one longer bit stack.
///
/// `ArrayBitStack<4, u64>` holds 256 levels. Word 0 carries the newest bits.
#[derive(Debug, Clone, Copy)]
pub struct ArrayBitStack<const N: usize, T>(pub [T; N]);

macro_rules! impl_bitstack {
    ($($t:ty),*) => {
        $(
            impl BitStack for $t {
                #[inline]
                fn default() -> Self { 0 }

                #[inline]
                fn push(&mut self, bit: bool) {
                    *self = (*self << 1) | bit as $t;
                }

                #[inline]
                fn pop(&mut self) -> bool {
                    let bit = self.top();
                    *self >>= 1;
                    bit
                }

                #[inline]
                fn top(&self) -> bool { *self & 1 == 1 }

                #[inline]
                fn capacity() -> usize { <$t>::BITS as usize }
            }

            impl<const N: usize> BitStack for ArrayBitStack<N, $t> {
                fn default() -> Self {
                    ArrayBitStack([0; N])
                }

                fn push(&mut self, bit: bool) {
                    // The highest bit of each word moves into the next word
                    let mut carry = bit;
                    for word in self.0.iter_mut() {
                        let spill = *word >> (<$t>::BITS - 1) == 1;
                        word.push(carry);
                        carry = spill;
                    }
                }

                fn pop(&mut self) -> bool {
                    let mut carry = false;
                    for word in self.0.iter_mut().rev() {
                        let lowest = word.pop();
                        *word |= (carry as $t) << (<$t>::BITS - 1);
                        carry = lowest;
                    }
                    carry
                }

                fn top(&self) -> bool {
                    self.0.first().is_some_and(|word| word.top())
                }

                fn capacity() -> usize {
                    N * <$t>::BITS as usize
                }
            }
        )*
    };
}

impl_bitstack!(u8, u16, u32, u64, u128);
