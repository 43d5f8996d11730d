/// Single lit bit bouncing between bit 0 and bit 7
pub struct Scanner {
    value: u8,
    rising: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self { value: 1, rising: true }
    }
}

impl Scanner {
    /// Move one position and return the new pattern
    pub fn step(&mut self) -> u8 {
        if self.rising {
            self.value <<= 1;
            if self.value == 1 << 7 {
                self.rising = false;
            }
        } else {
            self.value >>= 1;
            if self.value == 1 {
                self.rising = true;
            }
        }
        self.value
    }
}

/// Indices of the buttons held down, buttons pull their pin low
pub fn pressed_buttons(inputs: u8) -> impl Iterator<Item = u8> {
    (0..8).filter(move |i| inputs & (1 << i) == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanner_bounces() {
        let mut scanner = Scanner::default();
        let steps: Vec<u8> = (0..16).map(|_| scanner.step()).collect();
        assert_eq!(
            steps,
            [2, 4, 8, 16, 32, 64, 128, 64, 32, 16, 8, 4, 2, 1, 2, 4]
        );
    }

    #[test]
    fn pressed_buttons_are_low_bits() {
        assert_eq!(pressed_buttons(0xff).count(), 0);
        assert_eq!(pressed_buttons(0b1111_1011).collect::<Vec<_>>(), [2]);
        assert_eq!(pressed_buttons(0b0111_1110).collect::<Vec<_>>(), [0, 7]);
    }
}
